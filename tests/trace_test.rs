mod common;

use common::{sample_value, small_file, small_file_with_format, truncated_file, unsorted_file, SAMPLES, TRACES};
use seisio::skills::{BoundsCheck, Closable, HeaderReader, TraceMeta, TraceReader, TraceWriter, WriteAlways};
use seisio::{Error, Format, Sorting, TraceFile, Unstructured, Volume};

#[test]
fn test_metadata_matches_reference_file() {
    let tmp = small_file();
    let f = Unstructured::open(tmp.path()).unwrap();

    assert_eq!(f.samples(), SAMPLES);
    assert_eq!(f.format(), Format::Ieee);
    assert_eq!(f.trace0(), 3600);
    assert_eq!(f.tracesize(), SAMPLES * 4);
    assert_eq!(f.tracecount(), TRACES as u64);
}

#[test]
fn test_get_reads_expected_samples() {
    let tmp = small_file();
    let mut f = Unstructured::open(tmp.path()).unwrap();

    for traceno in [0, 7, 24] {
        let got: Vec<f64> = f.get(traceno).unwrap().collect();
        let want: Vec<f64> = (0..SAMPLES).map(|k| sample_value(traceno, k)).collect();
        assert_eq!(got, want, "trace {traceno}");
    }
}

#[test]
fn test_samples_traversal_is_bounded() {
    let tmp = small_file();
    let mut f = Unstructured::open(tmp.path()).unwrap();

    let mut it = f.get(3).unwrap();
    assert_eq!(it.len(), SAMPLES);
    it.by_ref().take(10).for_each(drop);
    assert_eq!(it.len(), SAMPLES - 10);
    assert_eq!(it.count(), SAMPLES - 10);
}

#[test]
fn test_bounds_check_distinguishes_errors() {
    let tmp = small_file();
    let mut f = TraceFile::<(TraceMeta, BoundsCheck, TraceReader)>::open(tmp.path()).unwrap();

    assert!(matches!(f.get(-1).unwrap_err(), Error::IndexNegative(-1)));
    assert!(matches!(
        f.get(1000).unwrap_err(),
        Error::IndexTooLarge { index: 1000, count: 25 }
    ));
    assert!(f.get(24).is_ok());
}

#[test]
fn test_unchecked_out_of_range_is_a_codec_error() {
    let tmp = small_file();
    let mut f = Unstructured::open(tmp.path()).unwrap();

    // No bounds-check skill composed: the bad index reaches the codec.
    assert!(matches!(f.get(1000).unwrap_err(), Error::Read { .. }));
}

#[test]
fn test_header_reader_reflects_geometry() {
    let tmp = small_file();
    let mut f = TraceFile::<(TraceMeta, HeaderReader)>::open(tmp.path()).unwrap();

    let x = f.get_th(0).unwrap();
    let y = f.get_th(1).unwrap();
    let z = f.get_th(5).unwrap();

    assert_eq!(x.iline, 1);
    assert_eq!(y.iline, 1);
    assert_eq!(z.iline, 2);

    assert_eq!(x.xline, 20);
    assert_eq!(y.xline, 21);
    assert_eq!(z.xline, 20);

    assert_eq!(x.samples, SAMPLES as i32);
    assert_eq!(x.sequence_line, 0);
    assert_eq!(x.cdp_x, 0);
}

#[test]
fn test_put_get_roundtrip_for_every_encoding() {
    for format in [Format::Ieee, Format::Ibm, Format::Int4, Format::Int2, Format::Int1] {
        let tmp = small_file_with_format(format);
        let mut f = TraceFile::<(WriteAlways, TraceMeta, TraceWriter, BoundsCheck)>::open(tmp.path())
            .unwrap();

        let values: Vec<f64> = (0..SAMPLES).map(|k| f64::from(k as i32 - 25)).collect();
        f.put(3, values.iter().copied()).unwrap();

        let got: Vec<f64> = f.get(3).unwrap().collect();
        assert_eq!(got, values, "{format}");

        // Neighbouring traces are untouched.
        let other: Vec<f64> = f.get(4).unwrap().collect();
        let want: Vec<f64> = (0..SAMPLES).map(|k| sample_value(4, k)).collect();
        assert_eq!(other, want, "{format}");
    }
}

#[test]
fn test_short_put_input_fails() {
    let tmp = small_file();
    let mut f = TraceFile::<(WriteAlways, TraceMeta, TraceWriter)>::open(tmp.path()).unwrap();

    let err = f.put(0, vec![1.0; 10]).unwrap_err();
    assert!(matches!(err, Error::ShortInput { got: 10, expected: 50 }));
}

#[test]
fn test_cube_stats_on_rectangular_geometry() {
    let tmp = small_file();
    let f = Volume::open(tmp.path()).unwrap();

    assert_eq!(f.sorting(), Sorting::Inline);
    assert_eq!(f.inlinecount(), 5);
    assert_eq!(f.crosslinecount(), 5);
    assert_eq!(f.offsetcount(), 1);
}

#[test]
fn test_cube_stats_rejects_unsorted_file() {
    let tmp = unsorted_file();
    assert!(matches!(Volume::open(tmp.path()).unwrap_err(), Error::Unsorted));
}

#[test]
fn test_uneven_file_size_fails_metadata() {
    let tmp = truncated_file();
    let err = Unstructured::open(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::TraceSizeMismatch { trace0: 3600 }));
}

#[test]
fn test_record_access_after_close_is_illegal() {
    let tmp = small_file();
    let mut f = TraceFile::<(TraceMeta, TraceReader, Closable)>::open(tmp.path()).unwrap();

    f.close();
    assert!(matches!(f.get(0).unwrap_err(), Error::Closed));
}

#[test]
fn test_clone_reads_independently() {
    let tmp = small_file();
    let mut f = Unstructured::open(tmp.path()).unwrap();
    let mut g = f.try_clone().unwrap();

    let a: Vec<f64> = f.get(2).unwrap().collect();
    let b: Vec<f64> = g.get(2).unwrap().collect();
    assert_eq!(a, b);
}
