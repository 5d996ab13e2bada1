//! Strong-typed parameter wrappers.
//!
//! Every scalar that crosses the construction boundary gets its own type, so
//! `TraceFile::open_with(path, Config::new().with_iline(..))` cannot be
//! called with the inline and crossline positions swapped, and a raw format
//! or sorting code from a file is validated the moment it becomes a value.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::field::Field;

// ── Mode ─────────────────────────────────────────────────────────────────────

/// Open mode for the underlying file resource.
///
/// The closed set mirrors the codec's accepted mode strings: `r`, `r+` and
/// `w+`, each optionally suffixed with a `b` marker when parsed from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    ReadOnly,
    ReadWrite,
    Truncate,
}

impl Mode {
    /// The mode string handed to the codec when opening.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::ReadOnly  => "r",
            Mode::ReadWrite => "r+",
            Mode::Truncate  => "w+",
        }
    }

    /// True for any mode that permits writing.
    pub const fn writable(self) -> bool {
        !matches!(self, Mode::ReadOnly)
    }

    /// True for the mode that destroys existing contents on open.
    pub const fn truncates(self) -> bool {
        matches!(self, Mode::Truncate)
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "r" | "rb"    => Ok(Mode::ReadOnly),
            "r+" | "r+b"  => Ok(Mode::ReadWrite),
            "w+" | "w+b"  => Ok(Mode::Truncate),
            _             => Err(Error::InvalidMode(s.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Format ───────────────────────────────────────────────────────────────────

/// Sample data format, from the binary header's format code.
///
/// `FixedGain` is a recognised code and survives validation, but no decoder
/// exists for it: record access on a fixed-gain file reports
/// [`Error::BrokenFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ibm       = 1,
    Int4      = 2,
    Int2      = 3,
    FixedGain = 4,
    Ieee      = 5,
    Int1      = 8,
}

impl Format {
    /// Validate a raw format code from a binary header.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Format::Ibm),
            2 => Ok(Format::Int4),
            3 => Ok(Format::Int2),
            4 => Ok(Format::FixedGain),
            5 => Ok(Format::Ieee),
            8 => Ok(Format::Int1),
            _ => Err(Error::UnknownFormat(code)),
        }
    }

    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Width of one encoded sample in bytes.
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            Format::Ibm | Format::Int4 | Format::FixedGain | Format::Ieee => 4,
            Format::Int2 => 2,
            Format::Int1 => 1,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Format::Ibm       => "ibm float",
            Format::Int4      => "int",
            Format::Int2      => "short",
            Format::FixedGain => "fixed-point float with gain",
            Format::Ieee      => "ieee float",
            Format::Int1      => "byte",
        }
    }
}

impl TryFrom<i32> for Format {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Format::from_code(code)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// ── Sorting ──────────────────────────────────────────────────────────────────

/// Trace sort order as classified by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sorting {
    Crossline = 1,
    Inline    = 2,
}

impl Sorting {
    /// Validate a raw sorting code.  Code 0 (unknown) is rejected — a
    /// classified-but-unknown sorting never becomes a value.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Sorting::Crossline),
            2 => Ok(Sorting::Inline),
            _ => Err(Error::UnknownSorting(code)),
        }
    }

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn description(self) -> &'static str {
        match self {
            Sorting::Crossline => "crossline",
            Sorting::Inline    => "inline",
        }
    }
}

impl TryFrom<i32> for Sorting {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Sorting::from_code(code)
    }
}

impl fmt::Display for Sorting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// ── Geometry field positions ─────────────────────────────────────────────────

/// Trace-header position of the inline number.  Not interchangeable with
/// [`XlByte`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IlByte(Field);

impl IlByte {
    pub const fn new(field: Field) -> Self {
        IlByte(field)
    }

    /// Validate a raw byte position (e.g. from a CLI flag).
    pub fn from_code(code: i32) -> Result<Self> {
        Ok(IlByte(Field::try_from(code)?))
    }

    pub const fn field(self) -> Field {
        self.0
    }
}

impl Default for IlByte {
    fn default() -> Self {
        IlByte(Field::Inline)
    }
}

/// Trace-header position of the crossline number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XlByte(Field);

impl XlByte {
    pub const fn new(field: Field) -> Self {
        XlByte(field)
    }

    pub fn from_code(code: i32) -> Result<Self> {
        Ok(XlByte(Field::try_from(code)?))
    }

    pub const fn field(self) -> Field {
        self.0
    }
}

impl Default for XlByte {
    fn default() -> Self {
        XlByte(Field::Crossline)
    }
}

// ── Config ───────────────────────────────────────────────────────────────────

/// Named construction options for a composed handle.
///
/// Immutable once construction starts: skills may derive a corrected open
/// mode from `mode`, but the caller's `Config` is never mutated.
#[derive(Debug, Clone, Default)]
pub struct Config {
    mode:  Mode,
    iline: IlByte,
    xline: XlByte,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_iline(mut self, iline: IlByte) -> Self {
        self.iline = iline;
        self
    }

    pub fn with_xline(mut self, xline: XlByte) -> Self {
        self.xline = xline;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn iline(&self) -> IlByte {
        self.iline
    }

    pub fn xline(&self) -> XlByte {
        self.xline
    }
}
