//! The fixed-schema trace header value type.

use crate::codec;
use crate::compose::{Caps, Skill};
use crate::error::{Error, Result};
use crate::field::Field;
use crate::handle::TraceFile;
use crate::trace::trace_io;

/// All named fields of one 240-byte trace header, decoded to native
/// integers.  Purely a value: no identity, no lifecycle beyond the call
/// that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceHeader {
    pub sequence_line:          i32,
    pub sequence_file:          i32,
    pub field_record:           i32,
    pub traceno_orig:           i32,
    pub energy_source_point:    i32,
    pub ensemble:               i32,
    pub traceno:                i32,
    pub trace_id:               i32,
    pub summed_traces:          i32,
    pub stacked_traces:         i32,
    pub data_use:               i32,
    pub offset:                 i32,
    pub elevation_receiver:     i32,
    pub elevation_source:       i32,
    pub depth_source:           i32,
    pub datum_receiver:         i32,
    pub datum_source:           i32,
    pub depth_water_source:     i32,
    pub depth_water_group:      i32,
    pub elevation_scalar:       i32,
    pub coord_scalar:           i32,
    pub source_x:               i32,
    pub source_y:               i32,
    pub group_x:                i32,
    pub group_y:                i32,
    pub coord_units:            i32,
    pub weathering_velocity:    i32,
    pub subweathering_velocity: i32,
    pub uphole_source:          i32,
    pub uphole_group:           i32,
    pub static_source:          i32,
    pub static_group:           i32,
    pub static_total:           i32,
    pub lag_a:                  i32,
    pub lag_b:                  i32,
    pub delay:                  i32,
    pub mute_start:             i32,
    pub mute_end:               i32,
    pub samples:                i32,
    pub sample_interval:        i32,
    pub gain_type:              i32,
    pub gain_constant:          i32,
    pub gain_initial:           i32,
    pub correlated:             i32,
    pub sweep_freq_start:       i32,
    pub sweep_freq_end:         i32,
    pub sweep_length:           i32,
    pub sweep_type:             i32,
    pub sweep_taperlen_start:   i32,
    pub sweep_taperlen_end:     i32,
    pub taper_type:             i32,
    pub alias_filt_freq:        i32,
    pub alias_filt_slope:       i32,
    pub notch_filt_freq:        i32,
    pub notch_filt_slope:       i32,
    pub low_cut_freq:           i32,
    pub high_cut_freq:          i32,
    pub low_cut_slope:          i32,
    pub high_cut_slope:         i32,
    pub year:                   i32,
    pub day:                    i32,
    pub hour:                   i32,
    pub min:                    i32,
    pub sec:                    i32,
    pub timecode:               i32,
    pub weighting_factor:       i32,
    pub geophone_group_roll1:   i32,
    pub geophone_group_first:   i32,
    pub geophone_group_last:    i32,
    pub gap_size:               i32,
    pub over_travel:            i32,
    pub cdp_x:                  i32,
    pub cdp_y:                  i32,
    pub iline:                  i32,
    pub xline:                  i32,
    pub shot_point:             i32,
    pub shot_point_scalar:      i32,
    pub unit:                   i32,
    pub transduction_mantissa:  i32,
    pub transduction_exponent:  i32,
    pub transduction_unit:      i32,
    pub device_id:              i32,
    pub scalar_trace_header:    i32,
    pub source_type:            i32,
    pub source_energy_dir_mant: i32,
    pub source_energy_dir_exp:  i32,
    pub source_measure_mant:    i32,
    pub source_measure_exp:     i32,
    pub source_measure_unit:    i32,
}

impl TraceHeader {
    /// Decode every field from a raw header via single-field codec queries.
    pub fn from_raw(raw: &[u8; codec::TRACE_HEADER_SIZE]) -> Self {
        let getf = |field| codec::header_field(raw, field);

        TraceHeader {
            sequence_line:          getf(Field::SeqLine),
            sequence_file:          getf(Field::SeqFile),
            field_record:           getf(Field::FieldRecord),
            traceno_orig:           getf(Field::NumberOrigField),
            energy_source_point:    getf(Field::EnergySourcePoint),
            ensemble:               getf(Field::Ensemble),
            traceno:                getf(Field::NumInEnsemble),
            trace_id:               getf(Field::TraceId),
            summed_traces:          getf(Field::SummedTraces),
            stacked_traces:         getf(Field::StackedTraces),
            data_use:               getf(Field::DataUse),
            offset:                 getf(Field::Offset),
            elevation_receiver:     getf(Field::RecvGroupElev),
            elevation_source:       getf(Field::SourceSurfElev),
            depth_source:           getf(Field::SourceDepth),
            datum_receiver:         getf(Field::RecvDatumElev),
            datum_source:           getf(Field::SourceDatumElev),
            depth_water_source:     getf(Field::SourceWaterDepth),
            depth_water_group:      getf(Field::GroupWaterDepth),
            elevation_scalar:       getf(Field::ElevScalar),
            coord_scalar:           getf(Field::SourceGroupScalar),
            source_x:               getf(Field::SourceX),
            source_y:               getf(Field::SourceY),
            group_x:                getf(Field::GroupX),
            group_y:                getf(Field::GroupY),
            coord_units:            getf(Field::CoordUnits),
            weathering_velocity:    getf(Field::WeatheringVelo),
            subweathering_velocity: getf(Field::SubweatheringVelo),
            uphole_source:          getf(Field::SourceUpholeTime),
            uphole_group:           getf(Field::GroupUpholeTime),
            static_source:          getf(Field::SourceStaticCorr),
            static_group:           getf(Field::GroupStaticCorr),
            static_total:           getf(Field::TotStaticApplied),
            lag_a:                  getf(Field::LagA),
            lag_b:                  getf(Field::LagB),
            delay:                  getf(Field::DelayRecTime),
            mute_start:             getf(Field::MuteTimeStart),
            mute_end:               getf(Field::MuteTimeEnd),
            samples:                getf(Field::SampleCount),
            sample_interval:        getf(Field::SampleInter),
            gain_type:              getf(Field::GainType),
            gain_constant:          getf(Field::InstrGainConst),
            gain_initial:           getf(Field::InstrInitGain),
            correlated:             getf(Field::Correlated),
            sweep_freq_start:       getf(Field::SweepFreqStart),
            sweep_freq_end:         getf(Field::SweepFreqEnd),
            sweep_length:           getf(Field::SweepLength),
            sweep_type:             getf(Field::SweepType),
            sweep_taperlen_start:   getf(Field::SweepTaperlenStart),
            sweep_taperlen_end:     getf(Field::SweepTaperlenEnd),
            taper_type:             getf(Field::TaperType),
            alias_filt_freq:        getf(Field::AliasFiltFreq),
            alias_filt_slope:       getf(Field::AliasFiltSlope),
            notch_filt_freq:        getf(Field::NotchFiltFreq),
            notch_filt_slope:       getf(Field::NotchFiltSlope),
            low_cut_freq:           getf(Field::LowCutFreq),
            high_cut_freq:          getf(Field::HighCutFreq),
            low_cut_slope:          getf(Field::LowCutSlope),
            high_cut_slope:         getf(Field::HighCutSlope),
            year:                   getf(Field::YearDataRec),
            day:                    getf(Field::DayOfYear),
            hour:                   getf(Field::HourOfDay),
            min:                    getf(Field::MinOfHour),
            sec:                    getf(Field::SecOfMin),
            timecode:               getf(Field::TimeBaseCode),
            weighting_factor:       getf(Field::WeightingFac),
            geophone_group_roll1:   getf(Field::GeophoneGroupRoll1),
            geophone_group_first:   getf(Field::GeophoneGroupFirst),
            geophone_group_last:    getf(Field::GeophoneGroupLast),
            gap_size:               getf(Field::GapSize),
            over_travel:            getf(Field::OverTravel),
            cdp_x:                  getf(Field::CdpX),
            cdp_y:                  getf(Field::CdpY),
            iline:                  getf(Field::Inline),
            xline:                  getf(Field::Crossline),
            shot_point:             getf(Field::ShotPoint),
            shot_point_scalar:      getf(Field::ShotPointScalar),
            unit:                   getf(Field::MeasureUnit),
            transduction_mantissa:  getf(Field::TransductionMant),
            transduction_exponent:  getf(Field::TransductionExp),
            transduction_unit:      getf(Field::TransductionUnit),
            device_id:              getf(Field::DeviceId),
            scalar_trace_header:    getf(Field::ScalarTraceHeader),
            source_type:            getf(Field::SourceType),
            source_energy_dir_mant: getf(Field::SourceEnergyDirMant),
            source_energy_dir_exp:  getf(Field::SourceEnergyDirExp),
            source_measure_mant:    getf(Field::SourceMeasureMant),
            source_measure_exp:     getf(Field::SourceMeasureExp),
            source_measure_unit:    getf(Field::SourceMeasureUnit),
        }
    }
}

impl<S: Skill> TraceFile<S> {
    /// Decode the full header of trace `i`.  Either every field is filled
    /// or the call fails; there are no partial headers.
    pub fn get_th(&mut self, i: i32) -> Result<TraceHeader> {
        const {
            assert!(
                S::TAGS.contains(Caps::HEADER_READER),
                "get_th() requires the header reader skill"
            )
        };

        self.skills.check_index(i, &self.core)?;
        let meta = match self.core.meta() {
            Some(m) => *m,
            None => return Err(Error::SkillOrder { skill: "header reader" }),
        };

        let file = self.core.escape()?;
        let mut raw = [0u8; codec::TRACE_HEADER_SIZE];
        codec::read_traceheader(file, i, &mut raw, meta.trace0, meta.trace_bsize)
            .map_err(|s| trace_io(format!("reading the header of trace {i}"), s))?;

        Ok(TraceHeader::from_raw(&raw))
    }
}
