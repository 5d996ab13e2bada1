//! The capability-module catalogue.
//!
//! Every skill here is a zero-sized marker whose hooks read and populate the
//! shared [`HandleCore`] slots.  What a skill *requires* must be listed to
//! its left: the reader and writer skills need [`TraceMeta`] to have run
//! first, and fail construction with a clear ordering error otherwise.
//!
//! Mode policy skills show both enforcement layers.  [`ReadOnly`] refuses,
//! at build time, to be composed with anything that grants writability, and
//! additionally rejects a caller-supplied writable mode during construction.

use tracing::debug;

use crate::codec::{self, CodecStatus};
use crate::compose::{Caps, Skill};
use crate::error::{Error, Result};
use crate::field::Field;
use crate::handle::{Cube, HandleCore, Meta};
use crate::types::{Config, Format, Mode, Sorting};

// ── Lifecycle skills ─────────────────────────────────────────────────────────

/// Forbids duplication: `try_clone()` on a handle composed with this skill
/// is a compile-time error.
///
/// ```compile_fail
/// use seisio::skills::Unique;
/// use seisio::TraceFile;
///
/// let f = TraceFile::<Unique>::open("cube.sgy")?;
/// let g = f.try_clone(); // unique handles cannot be duplicated
/// # Ok::<(), seisio::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Unique;

impl Skill for Unique {
    const TAGS: Caps = Caps::UNIQUE;
}

/// Grants `close()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Closable;

impl Skill for Closable {
    const TAGS: Caps = Caps::CLOSABLE;
}

/// Grants `is_open()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenStatus;

impl Skill for OpenStatus {
    const TAGS: Caps = Caps::OPEN_STATUS;
}

/// Grants `detached()` construction and `reopen()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeferredOpen;

impl Skill for DeferredOpen {
    const TAGS: Caps = Caps::DEFERRED_OPEN;
}

// ── Mode policy skills ───────────────────────────────────────────────────────

/// Enforced read-only: statically incompatible with any write-granting
/// skill, and rejects a writable open mode at construction.
///
/// ```compile_fail
/// use seisio::skills::{ReadOnly, WriteAlways};
/// use seisio::TraceFile;
///
/// // read-only requested, but a skill introduces writability
/// let _ = TraceFile::<(ReadOnly, WriteAlways)>::open("cube.sgy");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnly;

impl Skill for ReadOnly {
    const TAGS:      Caps = Caps::READ_ONLY;
    const CONFLICTS: Caps = Caps::WRITABLE;

    fn coerce_mode(&mut self, mode: Mode) -> Result<Mode> {
        if mode.writable() {
            return Err(Error::WriteForbidden { mode });
        }
        Ok(mode)
    }
}

/// Forces the handle writable by coercing the mode to read-write.  Refuses
/// composition with anything that truncates, so an always-writable handle
/// can never destroy the file it opens.
///
/// ```compile_fail
/// use seisio::skills::{TruncateAlways, WriteAlways};
/// use seisio::TraceFile;
///
/// // write-always promises not to truncate; truncate-always must truncate
/// let _ = TraceFile::<(WriteAlways, TruncateAlways)>::open("cube.sgy");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteAlways;

impl Skill for WriteAlways {
    const TAGS:      Caps = Caps::WRITE_ALWAYS;
    const GRANTS:    Caps = Caps::WRITABLE;
    const CONFLICTS: Caps = Caps::TRUNCATES;

    fn coerce_mode(&mut self, _mode: Mode) -> Result<Mode> {
        Ok(Mode::ReadWrite)
    }
}

/// Forces create/truncate semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncateAlways;

impl Skill for TruncateAlways {
    const TAGS:   Caps = Caps::TRUNCATE_ALWAYS;
    const GRANTS: Caps = Caps::WRITABLE.union(Caps::TRUNCATES);

    fn coerce_mode(&mut self, _mode: Mode) -> Result<Mode> {
        Ok(Mode::Truncate)
    }
}

/// Rejects any mode that would truncate, without forbidding plain writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTruncate;

impl Skill for NoTruncate {
    const TAGS:      Caps = Caps::NO_TRUNCATE;
    const CONFLICTS: Caps = Caps::TRUNCATES;

    fn coerce_mode(&mut self, mode: Mode) -> Result<Mode> {
        if mode.truncates() {
            return Err(Error::TruncateForbidden { mode });
        }
        Ok(mode)
    }
}

// ── Metadata ─────────────────────────────────────────────────────────────────

/// Pulls the basic file metadata — samples per trace, data format, first
/// trace offset, trace byte size and trace count — through the codec and
/// caches it in the handle.
///
/// Most record-access skills depend on this one and must be listed after
/// it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceMeta;

impl Skill for TraceMeta {
    const TAGS: Caps = Caps::TRACE_META;

    fn post_open(&mut self, core: &mut HandleCore) -> Result<()> {
        let file = core.escape()?;

        let raw = codec::read_binheader(file).map_err(|s| match s {
            CodecStatus::Seek(e) => Error::Seek {
                what:   "reading the binary header".into(),
                source: e,
            },
            CodecStatus::Read(e) => Error::Read {
                what:   "reading the binary header".into(),
                source: e,
            },
            other => Error::UnhandledCodec(other.code()),
        })?;
        let bin = codec::parse_binheader(&raw);

        if bin.samples <= 0 {
            return Err(Error::InvalidGeometry(format!(
                "expected samples > 0 (was {})",
                bin.samples
            )));
        }
        if bin.trace0 < 0 {
            return Err(Error::InvalidGeometry(format!(
                "expected trace0 >= 0 (was {})",
                bin.trace0
            )));
        }

        let format = Format::from_code(bin.format)?;
        let samples = bin.samples as usize;
        let trace_bsize = codec::trace_bsize(format, samples);
        let trace0 = bin.trace0 as u64;

        let trace_count = codec::count_traces(file, trace0, trace_bsize).map_err(|s| match s {
            CodecStatus::InvalidArgs => Error::InvalidGeometry(
                "first trace position computed after file end, extended textual \
                 header word corrupted or file truncated"
                    .into(),
            ),
            CodecStatus::SizeMismatch => Error::TraceSizeMismatch { trace0: bin.trace0 },
            CodecStatus::Seek(e) => Error::Seek {
                what:   "counting traces".into(),
                source: e,
            },
            other => Error::UnhandledCodec(other.code()),
        })?;

        debug!(samples, %format, trace_count, "trace metadata loaded");
        core.set_meta(Meta {
            samples,
            format,
            trace0,
            trace_bsize,
            trace_count,
        });
        Ok(())
    }
}

// ── Record access guards ─────────────────────────────────────────────────────

/// Rejects record indexes outside `[0, tracecount)`, with a distinct error
/// for negative indexes.  Without this skill, out-of-range access is
/// whatever the codec does with a bad offset — unchecked.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundsCheck;

impl Skill for BoundsCheck {
    const TAGS: Caps = Caps::BOUNDS_CHECK;

    fn post_open(&mut self, core: &mut HandleCore) -> Result<()> {
        if core.meta().is_none() {
            return Err(Error::SkillOrder { skill: "bounds checking" });
        }
        Ok(())
    }

    fn check_index(&self, i: i32, core: &HandleCore) -> Result<()> {
        let count = core.meta().map_or(0, |m| m.trace_count);
        if i < 0 {
            return Err(Error::IndexNegative(i));
        }
        if i as u64 >= count {
            return Err(Error::IndexTooLarge { index: i, count });
        }
        Ok(())
    }
}

// ── Record access ────────────────────────────────────────────────────────────

/// Grants `get()`: decode one trace into native samples.  Sizes the
/// one-record scratch buffer once the record size is known.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceReader;

impl Skill for TraceReader {
    const TAGS: Caps = Caps::TRACE_READER;

    fn post_open(&mut self, core: &mut HandleCore) -> Result<()> {
        let bsize = match core.meta() {
            Some(m) => m.trace_bsize,
            None => return Err(Error::SkillOrder { skill: "trace reader" }),
        };
        core.resize_buffer(bsize);
        Ok(())
    }
}

/// Grants `get_th()`: decode one full trace header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderReader;

impl Skill for HeaderReader {
    const TAGS: Caps = Caps::HEADER_READER;

    fn post_open(&mut self, core: &mut HandleCore) -> Result<()> {
        if core.meta().is_none() {
            return Err(Error::SkillOrder { skill: "header reader" });
        }
        Ok(())
    }
}

/// Grants `put()` — and `get()`, since a writer that cannot read back is
/// useless.  Requires some other skill to grant writability; `put()` proves
/// that at build time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceWriter;

impl Skill for TraceWriter {
    const TAGS: Caps = Caps::TRACE_WRITER;

    fn post_open(&mut self, core: &mut HandleCore) -> Result<()> {
        let bsize = match core.meta() {
            Some(m) => m.trace_bsize,
            None => return Err(Error::SkillOrder { skill: "trace writer" }),
        };
        core.resize_buffer(bsize);
        Ok(())
    }
}

// ── Cube geometry ────────────────────────────────────────────────────────────

/// Proves at construction that the file is a cleanly sorted cube, caching
/// sort order, offset count and line counts.  A file that is not sorted, or
/// whose geometry is inconsistent, fails construction rather than yielding
/// partial statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeStats;

impl Skill for CubeStats {
    const TAGS: Caps = Caps::CUBE_STATS;

    fn configure(&mut self, core: &mut HandleCore, cfg: &Config) -> Result<()> {
        let meta = match core.meta() {
            Some(m) => *m,
            None => return Err(Error::SkillOrder { skill: "cube stats" }),
        };
        let il = cfg.iline().field();
        let xl = cfg.xline().field();
        let file = core.escape()?;

        let code = codec::classify_sorting(
            file,
            il,
            xl,
            Field::Offset,
            meta.trace0,
            meta.trace_bsize,
            meta.trace_count,
        )
        .map_err(|s| match s {
            CodecStatus::InvalidField(c) => Error::InvalidField(c),
            CodecStatus::InvalidSorting => Error::Unsorted,
            CodecStatus::Seek(e) => Error::Seek {
                what:   "determining sorting".into(),
                source: e,
            },
            CodecStatus::Read(e) => Error::Read {
                what:   "determining sorting".into(),
                source: e,
            },
            other => Error::UnhandledCodec(other.code()),
        })?;
        let sorting = Sorting::from_code(code)?;

        let offsets = codec::count_offsets(
            file,
            il,
            xl,
            meta.trace0,
            meta.trace_bsize,
            meta.trace_count,
        )
        .map_err(|s| match s {
            CodecStatus::Seek(e) => Error::Seek {
                what:   "counting offsets".into(),
                source: e,
            },
            CodecStatus::Read(e) => Error::Read {
                what:   "counting offsets".into(),
                source: e,
            },
            other => Error::UnhandledCodec(other.code()),
        })?;

        let (inlines, crosslines) = codec::count_lines(
            file,
            il,
            xl,
            sorting,
            offsets,
            meta.trace0,
            meta.trace_bsize,
            meta.trace_count,
        )
        .map_err(|s| match s {
            CodecStatus::NotFound => Error::OffsetsOnly,
            CodecStatus::InvalidArgs => Error::InvalidGeometry(
                "line geometry is inconsistent with the trace count".into(),
            ),
            CodecStatus::Seek(e) => Error::Seek {
                what:   "counting lines".into(),
                source: e,
            },
            CodecStatus::Read(e) => Error::Read {
                what:   "counting lines".into(),
                source: e,
            },
            other => Error::UnhandledCodec(other.code()),
        })?;

        debug!(%sorting, inlines, crosslines, offsets, "classified cube geometry");
        core.set_cube(Cube {
            sorting,
            inlines,
            crosslines,
            offsets,
        });
        Ok(())
    }
}
