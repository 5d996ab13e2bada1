//! Crate-wide error taxonomy.
//!
//! Four families, kept deliberately distinct so callers can tell them apart
//! without string matching:
//!
//! - **configuration** — bad format/sorting/mode/field values, and open-mode
//!   policy rejections.  Detected eagerly, never coerced.
//! - **resource** — the underlying file could not be opened or is closed;
//!   the OS reason is attached.
//! - **protocol** — a low-level codec operation failed (seek/read/write,
//!   inconsistent geometry).  An unrecognised codec status is reported as
//!   [`Error::UnhandledCodec`], never swallowed.
//! - **invariant** — logic errors such as a record-access skill listed
//!   before its metadata dependency, or a format that was valid at open
//!   time but is unusable at decode time.  Never retried.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::{Format, Mode};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // ── configuration ────────────────────────────────────────────────────────
    #[error("mode must be one of r, r+, w+, was {0}")]
    InvalidMode(String),
    #[error("unknown format specifier key {0}")]
    UnknownFormat(i32),
    #[error("unknown sorting specifier {0}")]
    UnknownSorting(i32),
    #[error("unknown trace header field {0}")]
    InvalidField(i32),
    #[error("mode {mode} enables write in a file marked read-only")]
    WriteForbidden { mode: Mode },
    #[error("mode {mode} would truncate, add a truncate skill to allow")]
    TruncateForbidden { mode: Mode },

    // ── resource ─────────────────────────────────────────────────────────────
    #[error("unable to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("file handle is closed")]
    Closed,

    // ── codec protocol ───────────────────────────────────────────────────────
    #[error("seek failed while {what}: {source}")]
    Seek { what: String, source: io::Error },
    #[error("read failed while {what}: {source}")]
    Read { what: String, source: io::Error },
    #[error("write failed while {what}: {source}")]
    Write { what: String, source: io::Error },
    #[error("{0}")]
    InvalidGeometry(String),
    #[error(
        "file size does not evenly divide into traces, either traces are of \
         uneven length, or trace0 is wrong (was {trace0})"
    )]
    TraceSizeMismatch { trace0: i64 },
    #[error("file is not sorted")]
    Unsorted,
    #[error("found only offsets in file")]
    OffsetsOnly,
    #[error("unhandled codec error (code {0})")]
    UnhandledCodec(i32),

    // ── bounds ───────────────────────────────────────────────────────────────
    #[error("trace index {0} < 0")]
    IndexNegative(i32),
    #[error("trace index {index} >= tracecount (which is {count})")]
    IndexTooLarge { index: i32, count: u64 },

    // ── invariant violations ─────────────────────────────────────────────────
    #[error("stored data format is broken (was {0})")]
    BrokenFormat(Format),
    #[error("{skill} listed without trace metadata; move a metadata skill earlier in the skill list")]
    SkillOrder { skill: &'static str },
    #[error("put needs {expected} samples, input ended after {got}")]
    ShortInput { got: usize, expected: usize },
}
