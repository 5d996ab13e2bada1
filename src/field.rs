//! Trace-header field catalogue.
//!
//! Field values are the 1-based byte positions of the standard 240-byte
//! trace header.  Whether a field is a 2- or 4-byte big-endian integer is
//! fixed by the standard and reported by [`Field::width`].

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SeqLine             = 1,
    SeqFile             = 5,
    FieldRecord         = 9,
    NumberOrigField     = 13,
    EnergySourcePoint   = 17,
    Ensemble            = 21,
    NumInEnsemble       = 25,
    TraceId             = 29,
    SummedTraces        = 31,
    StackedTraces       = 33,
    DataUse             = 35,
    Offset              = 37,
    RecvGroupElev       = 41,
    SourceSurfElev      = 45,
    SourceDepth         = 49,
    RecvDatumElev       = 53,
    SourceDatumElev     = 57,
    SourceWaterDepth    = 61,
    GroupWaterDepth     = 65,
    ElevScalar          = 69,
    SourceGroupScalar   = 71,
    SourceX             = 73,
    SourceY             = 77,
    GroupX              = 81,
    GroupY              = 85,
    CoordUnits          = 89,
    WeatheringVelo      = 91,
    SubweatheringVelo   = 93,
    SourceUpholeTime    = 95,
    GroupUpholeTime     = 97,
    SourceStaticCorr    = 99,
    GroupStaticCorr     = 101,
    TotStaticApplied    = 103,
    LagA                = 105,
    LagB                = 107,
    DelayRecTime        = 109,
    MuteTimeStart       = 111,
    MuteTimeEnd         = 113,
    SampleCount         = 115,
    SampleInter         = 117,
    GainType            = 119,
    InstrGainConst      = 121,
    InstrInitGain       = 123,
    Correlated          = 125,
    SweepFreqStart      = 127,
    SweepFreqEnd        = 129,
    SweepLength         = 131,
    SweepType           = 133,
    SweepTaperlenStart  = 135,
    SweepTaperlenEnd    = 137,
    TaperType           = 139,
    AliasFiltFreq       = 141,
    AliasFiltSlope      = 143,
    NotchFiltFreq       = 145,
    NotchFiltSlope      = 147,
    LowCutFreq          = 149,
    HighCutFreq         = 151,
    LowCutSlope         = 153,
    HighCutSlope        = 155,
    YearDataRec         = 157,
    DayOfYear           = 159,
    HourOfDay           = 161,
    MinOfHour           = 163,
    SecOfMin            = 165,
    TimeBaseCode        = 167,
    WeightingFac        = 169,
    GeophoneGroupRoll1  = 171,
    GeophoneGroupFirst  = 173,
    GeophoneGroupLast   = 175,
    GapSize             = 177,
    OverTravel          = 179,
    CdpX                = 181,
    CdpY                = 185,
    Inline              = 189,
    Crossline           = 193,
    ShotPoint           = 197,
    ShotPointScalar     = 201,
    MeasureUnit         = 203,
    TransductionMant    = 205,
    TransductionExp     = 209,
    TransductionUnit    = 211,
    DeviceId            = 213,
    ScalarTraceHeader   = 215,
    SourceType          = 217,
    SourceEnergyDirMant = 219,
    SourceEnergyDirExp  = 223,
    SourceMeasureMant   = 225,
    SourceMeasureExp    = 229,
    SourceMeasureUnit   = 231,
    Unassigned1         = 233,
    Unassigned2         = 237,
}

impl Field {
    /// 1-based byte position within the trace header.
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Encoded width in bytes: 4 for the big coordinate/number fields, 2 for
    /// everything else.
    pub const fn width(self) -> usize {
        use Field::*;
        match self {
            SeqLine | SeqFile | FieldRecord | NumberOrigField
            | EnergySourcePoint | Ensemble | NumInEnsemble | Offset
            | RecvGroupElev | SourceSurfElev | SourceDepth | RecvDatumElev
            | SourceDatumElev | SourceWaterDepth | GroupWaterDepth
            | SourceX | SourceY | GroupX | GroupY
            | CdpX | CdpY | Inline | Crossline | ShotPoint
            | TransductionMant | SourceEnergyDirMant | SourceMeasureMant
            | Unassigned1 | Unassigned2 => 4,
            _ => 2,
        }
    }
}

impl TryFrom<i32> for Field {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        use Field::*;
        match code {
            1   => Ok(SeqLine),
            5   => Ok(SeqFile),
            9   => Ok(FieldRecord),
            13  => Ok(NumberOrigField),
            17  => Ok(EnergySourcePoint),
            21  => Ok(Ensemble),
            25  => Ok(NumInEnsemble),
            29  => Ok(TraceId),
            31  => Ok(SummedTraces),
            33  => Ok(StackedTraces),
            35  => Ok(DataUse),
            37  => Ok(Offset),
            41  => Ok(RecvGroupElev),
            45  => Ok(SourceSurfElev),
            49  => Ok(SourceDepth),
            53  => Ok(RecvDatumElev),
            57  => Ok(SourceDatumElev),
            61  => Ok(SourceWaterDepth),
            65  => Ok(GroupWaterDepth),
            69  => Ok(ElevScalar),
            71  => Ok(SourceGroupScalar),
            73  => Ok(SourceX),
            77  => Ok(SourceY),
            81  => Ok(GroupX),
            85  => Ok(GroupY),
            89  => Ok(CoordUnits),
            91  => Ok(WeatheringVelo),
            93  => Ok(SubweatheringVelo),
            95  => Ok(SourceUpholeTime),
            97  => Ok(GroupUpholeTime),
            99  => Ok(SourceStaticCorr),
            101 => Ok(GroupStaticCorr),
            103 => Ok(TotStaticApplied),
            105 => Ok(LagA),
            107 => Ok(LagB),
            109 => Ok(DelayRecTime),
            111 => Ok(MuteTimeStart),
            113 => Ok(MuteTimeEnd),
            115 => Ok(SampleCount),
            117 => Ok(SampleInter),
            119 => Ok(GainType),
            121 => Ok(InstrGainConst),
            123 => Ok(InstrInitGain),
            125 => Ok(Correlated),
            127 => Ok(SweepFreqStart),
            129 => Ok(SweepFreqEnd),
            131 => Ok(SweepLength),
            133 => Ok(SweepType),
            135 => Ok(SweepTaperlenStart),
            137 => Ok(SweepTaperlenEnd),
            139 => Ok(TaperType),
            141 => Ok(AliasFiltFreq),
            143 => Ok(AliasFiltSlope),
            145 => Ok(NotchFiltFreq),
            147 => Ok(NotchFiltSlope),
            149 => Ok(LowCutFreq),
            151 => Ok(HighCutFreq),
            153 => Ok(LowCutSlope),
            155 => Ok(HighCutSlope),
            157 => Ok(YearDataRec),
            159 => Ok(DayOfYear),
            161 => Ok(HourOfDay),
            163 => Ok(MinOfHour),
            165 => Ok(SecOfMin),
            167 => Ok(TimeBaseCode),
            169 => Ok(WeightingFac),
            171 => Ok(GeophoneGroupRoll1),
            173 => Ok(GeophoneGroupFirst),
            175 => Ok(GeophoneGroupLast),
            177 => Ok(GapSize),
            179 => Ok(OverTravel),
            181 => Ok(CdpX),
            185 => Ok(CdpY),
            189 => Ok(Inline),
            193 => Ok(Crossline),
            197 => Ok(ShotPoint),
            201 => Ok(ShotPointScalar),
            203 => Ok(MeasureUnit),
            205 => Ok(TransductionMant),
            209 => Ok(TransductionExp),
            211 => Ok(TransductionUnit),
            213 => Ok(DeviceId),
            215 => Ok(ScalarTraceHeader),
            217 => Ok(SourceType),
            219 => Ok(SourceEnergyDirMant),
            223 => Ok(SourceEnergyDirExp),
            225 => Ok(SourceMeasureMant),
            229 => Ok(SourceMeasureExp),
            231 => Ok(SourceMeasureUnit),
            233 => Ok(Unassigned1),
            237 => Ok(Unassigned2),
            _   => Err(Error::InvalidField(code)),
        }
    }
}
