mod common;

use common::small_file;
use seisio::skills::{
    BoundsCheck, Closable, DeferredOpen, OpenStatus, ReadOnly, TraceMeta, TraceReader,
    TruncateAlways, Unique, WriteAlways,
};
use seisio::{BasicFile, Caps, Config, Error, Field, Format, Mode, Sorting, TraceFile, Unstructured};

#[test]
fn test_open_nonexistent_path_fails() {
    assert!(BasicFile::open("garbage").is_err());
    assert!(Unstructured::open("garbage").is_err());
}

#[test]
fn test_basic_open() {
    let tmp = small_file();
    BasicFile::open(tmp.path()).unwrap();
}

#[test]
fn test_non_copyable_can_open() {
    let tmp = small_file();
    TraceFile::<Unique>::open(tmp.path()).unwrap();
}

#[test]
fn test_open_status_is_queryable() {
    let tmp = small_file();
    let f = TraceFile::<OpenStatus>::open(tmp.path()).unwrap();
    assert!(f.is_open());
}

#[test]
fn test_close_releases_the_resource() {
    let tmp = small_file();
    let mut f = TraceFile::<(Closable, OpenStatus)>::open(tmp.path()).unwrap();
    f.close();
    assert!(!f.is_open());
}

#[test]
fn test_clone_and_close_leaves_other_intact() {
    type F = TraceFile<(OpenStatus, Closable)>;
    let tmp = small_file();

    // Closing the clone leaves the original open.
    let f = F::open(tmp.path()).unwrap();
    let mut g = f.try_clone().unwrap();
    assert!(f.is_open());
    assert!(g.is_open());
    g.close();
    assert!(f.is_open());
    assert!(!g.is_open());

    // Closing the original leaves the clone open.
    let mut f = F::open(tmp.path()).unwrap();
    let g = f.try_clone().unwrap();
    f.close();
    assert!(g.is_open());
    assert!(!f.is_open());
}

#[test]
fn test_moved_to_handle_is_open() {
    let tmp = small_file();
    let f = TraceFile::<OpenStatus>::open(tmp.path()).unwrap();
    let g = f; // f is retired by the move; only g can be observed
    assert!(g.is_open());
}

#[test]
fn test_open_can_be_deferred() {
    type F = TraceFile<(OpenStatus, DeferredOpen)>;
    let tmp = small_file();

    let mut f = F::detached();
    assert!(!f.is_open());
    f.reopen(tmp.path(), Config::default()).unwrap();
    assert!(f.is_open());
}

#[test]
fn test_detached_metadata_reports_zero() {
    type F = TraceFile<(DeferredOpen, TraceMeta)>;
    let f = F::detached();
    assert_eq!(f.samples(), 0);
    assert_eq!(f.tracecount(), 0);
}

#[test]
fn test_write_always_coerces_mode() {
    let tmp = small_file();
    let f = TraceFile::<(WriteAlways, OpenStatus)>::open(tmp.path()).unwrap();
    assert!(f.is_open());
}

#[test]
fn test_truncate_always_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.sgy");
    TraceFile::<TruncateAlways>::open(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_readonly_rejects_writable_mode() {
    let tmp = small_file();
    let cfg = Config::new().with_mode(Mode::ReadWrite);
    let err = TraceFile::<ReadOnly>::open_with(tmp.path(), cfg).unwrap_err();
    assert!(matches!(err, Error::WriteForbidden { mode: Mode::ReadWrite }));
}

#[test]
fn test_no_truncate_rejects_truncating_mode() {
    let tmp = small_file();
    let cfg = Config::new().with_mode(Mode::Truncate);
    let err = Unstructured::open_with(tmp.path(), cfg).unwrap_err();
    assert!(matches!(err, Error::TruncateForbidden { mode: Mode::Truncate }));
}

#[test]
fn test_bounds_check_without_metadata_fails_fast() {
    let tmp = small_file();
    let err = TraceFile::<BoundsCheck>::open(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::SkillOrder { .. }));
}

#[test]
fn test_reader_without_metadata_fails_fast() {
    let tmp = small_file();
    let err = TraceFile::<TraceReader>::open(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::SkillOrder { skill: "trace reader" }));
}

#[test]
fn test_reader_after_metadata_builds() {
    let tmp = small_file();
    TraceFile::<(TraceMeta, TraceReader)>::open(tmp.path()).unwrap();
}

#[test]
fn test_capability_queries_are_const() {
    const HAS_META: bool = Unstructured::knows_all(Caps::TRACE_META);
    const HAS_READ: bool = Unstructured::knows_any(Caps::TRACE_READER.union(Caps::TRACE_WRITER));
    const HAS_WRITE: bool = Unstructured::knows_any(Caps::TRACE_WRITER);
    const BARE: bool = BasicFile::knows_any(Caps::TRACE_META.union(Caps::TRACE_READER));

    assert!(HAS_META);
    assert!(HAS_READ);
    assert!(!HAS_WRITE);
    assert!(!BARE);
}

#[test]
fn test_mode_strings_validate_eagerly() {
    assert_eq!("r".parse::<Mode>().unwrap(), Mode::ReadOnly);
    assert_eq!("r+b".parse::<Mode>().unwrap(), Mode::ReadWrite);
    assert_eq!("w+".parse::<Mode>().unwrap(), Mode::Truncate);

    let err = "a+".parse::<Mode>().unwrap_err();
    assert!(err.to_string().contains("mode must be one of"));
}

#[test]
fn test_format_and_sorting_codes_validate_eagerly() {
    assert_eq!(Format::from_code(5).unwrap(), Format::Ieee);
    assert!(matches!(Format::from_code(7), Err(Error::UnknownFormat(7))));
    assert!(matches!(Sorting::from_code(0), Err(Error::UnknownSorting(0))));
    assert!(matches!(Field::try_from(2), Err(Error::InvalidField(2))));
}
