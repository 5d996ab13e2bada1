//! Composed file handles — the primary embedding surface.
//!
//! ```no_run
//! use seisio::{Config, Unstructured, Volume};
//!
//! // The zero-extras handle: open, introspect metadata, read one trace.
//! let mut f = Unstructured::open("survey.sgy")?;
//! let trace: Vec<f64> = f.get(0)?.collect();
//! assert_eq!(trace.len(), f.samples());
//!
//! // A handle that proves cube geometry at construction.
//! let cube = Volume::open_with("survey.sgy", Config::new())?;
//! println!("{} x {}", cube.inlinecount(), cube.crosslinecount());
//! # Ok::<(), seisio::Error>(())
//! ```
//!
//! A handle is in one of two states after construction: *open* (it owns a
//! live file resource) or, after an explicit [`TraceFile::close`], *closed*.
//! Closing releases the resource exactly once; dropping an open handle does
//! the same.  Duplication via [`TraceFile::try_clone`] always opens a new
//! independent resource from the same path and mode — two handles never
//! share file state.  Moves transfer exclusive ownership and the borrow
//! checker retires the source, so a moved-from handle cannot be observed at
//! all.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec;
use crate::compose::{Caps, Skill};
use crate::error::{Error, Result};
use crate::skills::{CubeStats, NoTruncate, ReadOnly, TraceMeta, TraceReader, TraceWriter, WriteAlways};
use crate::types::{Config, Format, Mode, Sorting};

// ── Cached state slots ───────────────────────────────────────────────────────

/// File metadata pulled from the binary header by the [`TraceMeta`] skill.
#[derive(Debug, Clone, Copy)]
pub struct Meta {
    pub samples:     usize,
    pub format:      Format,
    pub trace0:      u64,
    pub trace_bsize: usize,
    pub trace_count: u64,
}

/// Cube geometry computed by the [`CubeStats`] skill.
#[derive(Debug, Clone, Copy)]
pub struct Cube {
    pub sorting:    Sorting,
    pub inlines:    u64,
    pub crosslines: u64,
    pub offsets:    u64,
}

// ── HandleCore ───────────────────────────────────────────────────────────────

/// The handle base every skill hook receives: the exclusively-owned file
/// resource, the path and mode used to (re)open it, and the state slots the
/// skills populate.
///
/// Slots start empty; whichever skill is responsible fills them during its
/// post-open hook.  A skill that depends on a slot must be listed after the
/// skill that fills it.
#[derive(Debug, Default)]
pub struct HandleCore {
    file:   Option<File>,
    path:   PathBuf,
    mode:   Mode,
    meta:   Option<Meta>,
    cube:   Option<Cube>,
    buffer: Vec<u8>,
}

impl HandleCore {
    fn open(path: &Path, mode: Mode) -> Result<Self> {
        let file = codec::open(path, mode).map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?;
        Ok(HandleCore {
            file: Some(file),
            path: path.to_owned(),
            mode,
            meta: None,
            cube: None,
            buffer: Vec::new(),
        })
    }

    fn detached() -> Self {
        HandleCore::default()
    }

    /// The raw file resource, for codec calls.
    pub fn escape(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(Error::Closed)
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn set_meta(&mut self, meta: Meta) {
        self.meta = Some(meta);
    }

    pub fn cube(&self) -> Option<&Cube> {
        self.cube.as_ref()
    }

    pub fn set_cube(&mut self, cube: Cube) {
        self.cube = Some(cube);
    }

    /// Size the one-record scratch buffer.  Called by whichever skill first
    /// learns the record size.
    pub fn resize_buffer(&mut self, len: usize) {
        self.buffer.resize(len, 0);
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    fn close(&mut self) {
        self.file = None;
    }

    /// The file resource and scratch buffer together, for record I/O.
    pub(crate) fn io_parts(&mut self) -> Result<(&mut File, &mut Vec<u8>)> {
        match self.file {
            Some(ref mut file) => Ok((file, &mut self.buffer)),
            None => Err(Error::Closed),
        }
    }
}

// ── TraceFile ────────────────────────────────────────────────────────────────

/// A file handle composed from the skill list `S`.
///
/// The public surface of a given `TraceFile<S>` is the union of what its
/// skills contribute; calling an operation the composition does not support
/// is a compile-time error, not a runtime check.
#[derive(Debug)]
pub struct TraceFile<S: Skill> {
    pub(crate) core:   HandleCore,
    pub(crate) skills: S,
}

impl<S: Skill> TraceFile<S> {
    /// True iff every capability in `caps` is part of this composition.
    /// Answerable in `const` context.
    pub const fn knows_all(caps: Caps) -> bool {
        S::TAGS.contains(caps)
    }

    /// True iff at least one capability in `caps` is part of this
    /// composition.
    pub const fn knows_any(caps: Caps) -> bool {
        S::TAGS.intersects(caps)
    }

    /// Open `path` with the default configuration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, Config::default())
    }

    /// Open `path`, running every skill's construction hooks in list order:
    /// path → mode → open → post-open → post-open + config.  The first hook
    /// failure aborts construction and releases anything acquired so far.
    pub fn open_with(path: impl AsRef<Path>, cfg: Config) -> Result<Self> {
        const {
            assert!(
                !S::GRANTS.intersects(S::CONFLICTS),
                "skill composition grants a capability another skill forbids"
            )
        };

        let path = path.as_ref();
        let mut skills = S::default();

        skills.inspect_path(path)?;
        let mode = skills.coerce_mode(cfg.mode())?;
        debug!(path = %path.display(), %mode, "opening trace file");

        let mut core = HandleCore::open(path, mode)?;
        skills.post_open(&mut core)?;
        skills.configure(&mut core, &cfg)?;

        Ok(TraceFile { core, skills })
    }

    /// Duplicate this handle by opening a **new** file resource from the
    /// same path and mode.  Cached metadata and geometry are carried over;
    /// the two handles share nothing at the file level.
    pub fn try_clone(&self) -> Result<Self> {
        const {
            assert!(
                !S::TAGS.contains(Caps::UNIQUE),
                "handle is marked unique and cannot be duplicated"
            )
        };

        let file = codec::open(&self.core.path, self.core.mode).map_err(|source| Error::Open {
            path: self.core.path.clone(),
            source,
        })?;
        Ok(TraceFile {
            core: HandleCore {
                file:   Some(file),
                path:   self.core.path.clone(),
                mode:   self.core.mode,
                meta:   self.core.meta,
                cube:   self.core.cube,
                buffer: self.core.buffer.clone(),
            },
            skills: S::default(),
        })
    }

    // ── Lifecycle (skill-gated) ──────────────────────────────────────────────

    /// Release the file resource.  The handle enters the *closed* state;
    /// record access is illegal until reopened.
    pub fn close(&mut self) {
        const { assert!(S::TAGS.contains(Caps::CLOSABLE), "close() requires the closable skill") };
        self.core.close();
    }

    pub fn is_open(&self) -> bool {
        const {
            assert!(
                S::TAGS.contains(Caps::OPEN_STATUS),
                "is_open() requires the open-status skill"
            )
        };
        self.core.is_open()
    }

    /// A handle with no resource attached.  Metadata reports zero until the
    /// handle is opened.
    pub fn detached() -> Self {
        const {
            assert!(
                S::TAGS.contains(Caps::DEFERRED_OPEN),
                "detached() requires the deferred-open skill"
            )
        };
        TraceFile {
            core:   HandleCore::detached(),
            skills: S::default(),
        }
    }

    /// (Re)open this handle, re-entering the construction sequence.
    pub fn reopen(&mut self, path: impl AsRef<Path>, cfg: Config) -> Result<()> {
        const {
            assert!(
                S::TAGS.contains(Caps::DEFERRED_OPEN),
                "reopen() requires the deferred-open skill"
            )
        };
        *self = Self::open_with(path, cfg)?;
        Ok(())
    }

    // ── Metadata introspection (requires TraceMeta) ──────────────────────────

    /// Samples per trace.
    pub fn samples(&self) -> usize {
        const { assert!(S::TAGS.contains(Caps::TRACE_META), "samples() requires the trace metadata skill") };
        self.core.meta.map_or(0, |m| m.samples)
    }

    /// Sample data format.
    pub fn format(&self) -> Format {
        const { assert!(S::TAGS.contains(Caps::TRACE_META), "format() requires the trace metadata skill") };
        self.core.meta.map_or(Format::Ibm, |m| m.format)
    }

    /// Byte offset of the first trace, past all textual headers.
    pub fn trace0(&self) -> u64 {
        const { assert!(S::TAGS.contains(Caps::TRACE_META), "trace0() requires the trace metadata skill") };
        self.core.meta.map_or(0, |m| m.trace0)
    }

    /// Encoded byte size of one trace's sample data.
    pub fn tracesize(&self) -> usize {
        const { assert!(S::TAGS.contains(Caps::TRACE_META), "tracesize() requires the trace metadata skill") };
        self.core.meta.map_or(0, |m| m.trace_bsize)
    }

    /// Number of traces in the file.
    pub fn tracecount(&self) -> u64 {
        const { assert!(S::TAGS.contains(Caps::TRACE_META), "tracecount() requires the trace metadata skill") };
        self.core.meta.map_or(0, |m| m.trace_count)
    }

    // ── Cube geometry (requires CubeStats) ───────────────────────────────────

    pub fn sorting(&self) -> Sorting {
        const { assert!(S::TAGS.contains(Caps::CUBE_STATS), "sorting() requires the cube stats skill") };
        self.core.cube.map_or(Sorting::Inline, |c| c.sorting)
    }

    pub fn inlinecount(&self) -> u64 {
        const { assert!(S::TAGS.contains(Caps::CUBE_STATS), "inlinecount() requires the cube stats skill") };
        self.core.cube.map_or(0, |c| c.inlines)
    }

    pub fn crosslinecount(&self) -> u64 {
        const { assert!(S::TAGS.contains(Caps::CUBE_STATS), "crosslinecount() requires the cube stats skill") };
        self.core.cube.map_or(0, |c| c.crosslines)
    }

    pub fn offsetcount(&self) -> u64 {
        const { assert!(S::TAGS.contains(Caps::CUBE_STATS), "offsetcount() requires the cube stats skill") };
        self.core.cube.map_or(0, |c| c.offsets)
    }
}

// ── Canonical compositions ───────────────────────────────────────────────────

/// The bare handle: open and close on drop, nothing else.
pub type BasicFile = TraceFile<()>;

/// The standard read-capable base with room for extras appended after it.
pub type BasicUnstructured<Extra> = TraceFile<((TraceMeta, TraceReader, NoTruncate), Extra)>;

/// The zero-extras handle: open, read one trace, introspect metadata.
pub type Unstructured = BasicUnstructured<()>;

/// As [`Unstructured`], but statically refuses any write-granting skill.
pub type UnstructuredReadOnly = BasicUnstructured<ReadOnly>;

/// A handle that is always writable (mode coerced to read-write).
pub type UnstructuredWriter = TraceFile<(WriteAlways, TraceMeta, TraceWriter)>;

/// A handle whose construction proves the file is a sorted cube.
pub type Volume = BasicUnstructured<CubeStats>;
