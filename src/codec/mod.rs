//! Byte-level SEG-Y codec: the narrow boundary the handle layer calls into.
//!
//! # Boundary rules
//! Everything above this module — skills, handles, record access — consumes
//! the operations below and never touches file bytes directly.  Failures are
//! reported as [`CodecStatus`] codes; the caller maps each code to a
//! diagnosable condition and treats any code it does not recognise as a
//! distinct "unhandled codec error" rather than ignoring it.
//!
//! # Layout
//! A standard file is a 3200-byte textual header, a 400-byte binary header,
//! `ext` further 3200-byte extended textual headers, then `tracecount`
//! records of a 240-byte trace header followed by `samples * width` bytes of
//! sample data.  All on-disk integers are big-endian.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, NativeEndian};

use crate::field::Field;
use crate::types::{Format, Mode, Sorting};

pub const TEXT_HEADER_SIZE:   usize = 3200;
pub const BINARY_HEADER_SIZE: usize = 400;
pub const TRACE_HEADER_SIZE:  usize = 240;

/// File offset of the binary header.
const BINARY_HEADER_START: u64 = TEXT_HEADER_SIZE as u64;
/// End of the mandatory header region; first trace when no extended headers.
const HEADER_REGION: i64 = 3600;

// Offsets within the 400-byte binary header.
const BIN_SAMPLES:     usize = 20;
const BIN_FORMAT:      usize = 24;
const BIN_EXT_HEADERS: usize = 304;

// ── Status codes ─────────────────────────────────────────────────────────────

/// Low-level failure codes, one per way an operation can go wrong.
///
/// `Unhandled` is the extension point: a future codec revision may introduce
/// codes this build does not know, and callers must surface them instead of
/// ignoring them.
#[derive(Debug)]
pub enum CodecStatus {
    Seek(io::Error),
    Read(io::Error),
    Write(io::Error),
    InvalidArgs,
    SizeMismatch,
    InvalidField(i32),
    InvalidSorting,
    NotFound,
    Unhandled(i32),
}

impl CodecStatus {
    /// Numeric code, used when a status reaches a call site that has no
    /// specific mapping for it.
    pub fn code(&self) -> i32 {
        match self {
            CodecStatus::Seek(_)         => -1,
            CodecStatus::Read(_)         => -2,
            CodecStatus::Write(_)        => -3,
            CodecStatus::InvalidArgs     => -4,
            CodecStatus::SizeMismatch    => -5,
            CodecStatus::InvalidField(_) => -6,
            CodecStatus::InvalidSorting  => -7,
            CodecStatus::NotFound        => -8,
            CodecStatus::Unhandled(c)    => *c,
        }
    }
}

// ── Open ─────────────────────────────────────────────────────────────────────

/// Open the file resource for `mode`.  `Truncate` creates the file when
/// absent and destroys existing contents.
pub fn open(path: &Path, mode: Mode) -> io::Result<File> {
    match mode {
        Mode::ReadOnly  => OpenOptions::new().read(true).open(path),
        Mode::ReadWrite => OpenOptions::new().read(true).write(true).open(path),
        Mode::Truncate  => OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path),
    }
}

// ── Binary header ────────────────────────────────────────────────────────────

/// Raw binary-header fields, unvalidated.  `trace0` may be negative when the
/// extended-textual-header word is corrupt; the metadata skill rejects that.
#[derive(Debug, Clone, Copy)]
pub struct BinHeader {
    pub samples: i32,
    pub format:  i32,
    pub trace0:  i64,
}

pub fn read_binheader(file: &mut File) -> Result<[u8; BINARY_HEADER_SIZE], CodecStatus> {
    file.seek(SeekFrom::Start(BINARY_HEADER_START))
        .map_err(CodecStatus::Seek)?;
    let mut raw = [0u8; BINARY_HEADER_SIZE];
    file.read_exact(&mut raw).map_err(CodecStatus::Read)?;
    Ok(raw)
}

pub fn parse_binheader(raw: &[u8; BINARY_HEADER_SIZE]) -> BinHeader {
    let samples = i32::from(BigEndian::read_i16(&raw[BIN_SAMPLES..]));
    let format  = i32::from(BigEndian::read_i16(&raw[BIN_FORMAT..]));
    let ext     = i64::from(BigEndian::read_i16(&raw[BIN_EXT_HEADERS..]));
    BinHeader {
        samples,
        format,
        trace0: HEADER_REGION + ext * TEXT_HEADER_SIZE as i64,
    }
}

/// Encoded byte size of one record's sample data (header excluded).
pub fn trace_bsize(format: Format, samples: usize) -> usize {
    samples * format.bytes_per_sample()
}

/// Count whole records between `trace0` and end of file.
///
/// Fails with `InvalidArgs` when `trace0` lies beyond the file, and with
/// `SizeMismatch` when the remaining bytes do not divide evenly into
/// records.
pub fn count_traces(
    file:        &mut File,
    trace0:      u64,
    trace_bsize: usize,
) -> Result<u64, CodecStatus> {
    let size = file.seek(SeekFrom::End(0)).map_err(CodecStatus::Seek)?;
    if trace0 > size {
        return Err(CodecStatus::InvalidArgs);
    }
    let stride = (TRACE_HEADER_SIZE + trace_bsize) as u64;
    let body = size - trace0;
    if body % stride != 0 {
        return Err(CodecStatus::SizeMismatch);
    }
    Ok(body / stride)
}

// ── Record I/O ───────────────────────────────────────────────────────────────

fn trace_offset(i: i32, trace0: u64, trace_bsize: usize) -> i64 {
    let stride = (TRACE_HEADER_SIZE + trace_bsize) as i64;
    trace0 as i64 + i64::from(i) * stride
}

fn seek_signed(file: &mut File, pos: i64) -> Result<(), CodecStatus> {
    if pos < 0 {
        return Err(CodecStatus::Seek(io::Error::new(
            io::ErrorKind::InvalidInput,
            "seek position before start of file",
        )));
    }
    file.seek(SeekFrom::Start(pos as u64))
        .map_err(CodecStatus::Seek)?;
    Ok(())
}

/// Read one record's sample bytes into `buf[..trace_bsize]`, still in the
/// on-disk representation.  The index is not bounds-checked here.
pub fn read_trace(
    file:        &mut File,
    i:           i32,
    buf:         &mut [u8],
    trace0:      u64,
    trace_bsize: usize,
) -> Result<(), CodecStatus> {
    let pos = trace_offset(i, trace0, trace_bsize) + TRACE_HEADER_SIZE as i64;
    seek_signed(file, pos)?;
    file.read_exact(&mut buf[..trace_bsize])
        .map_err(CodecStatus::Read)
}

/// Write one record's sample bytes from `buf[..trace_bsize]`, which must
/// already hold the on-disk representation.
pub fn write_trace(
    file:        &mut File,
    i:           i32,
    buf:         &[u8],
    trace0:      u64,
    trace_bsize: usize,
) -> Result<(), CodecStatus> {
    let pos = trace_offset(i, trace0, trace_bsize) + TRACE_HEADER_SIZE as i64;
    seek_signed(file, pos)?;
    file.write_all(&buf[..trace_bsize])
        .map_err(CodecStatus::Write)
}

/// Read the raw 240-byte header of record `i`.
pub fn read_traceheader(
    file:        &mut File,
    i:           i32,
    buf:         &mut [u8; TRACE_HEADER_SIZE],
    trace0:      u64,
    trace_bsize: usize,
) -> Result<(), CodecStatus> {
    seek_signed(file, trace_offset(i, trace0, trace_bsize))?;
    file.read_exact(buf).map_err(CodecStatus::Read)
}

// ── Sample representation ────────────────────────────────────────────────────

/// Convert one record's samples from the on-disk representation to the
/// native one, in place.  IBM floats become native `f32`; integer formats
/// are byte-swapped as needed.
pub fn to_native(format: Format, samples: usize, buf: &mut [u8]) {
    match format {
        Format::Ibm => {
            for chunk in buf[..samples * 4].chunks_exact_mut(4) {
                let v = ibm_to_ieee(BigEndian::read_u32(chunk));
                NativeEndian::write_f32(chunk, v);
            }
        }
        Format::Ieee => {
            for chunk in buf[..samples * 4].chunks_exact_mut(4) {
                let v = BigEndian::read_f32(chunk);
                NativeEndian::write_f32(chunk, v);
            }
        }
        Format::Int4 | Format::FixedGain => {
            for chunk in buf[..samples * 4].chunks_exact_mut(4) {
                let v = BigEndian::read_i32(chunk);
                NativeEndian::write_i32(chunk, v);
            }
        }
        Format::Int2 => {
            for chunk in buf[..samples * 2].chunks_exact_mut(2) {
                let v = BigEndian::read_i16(chunk);
                NativeEndian::write_i16(chunk, v);
            }
        }
        Format::Int1 => {}
    }
}

/// Inverse of [`to_native`].
pub fn from_native(format: Format, samples: usize, buf: &mut [u8]) {
    match format {
        Format::Ibm => {
            for chunk in buf[..samples * 4].chunks_exact_mut(4) {
                let v = ieee_to_ibm(NativeEndian::read_f32(chunk));
                BigEndian::write_u32(chunk, v);
            }
        }
        Format::Ieee => {
            for chunk in buf[..samples * 4].chunks_exact_mut(4) {
                let v = NativeEndian::read_f32(chunk);
                BigEndian::write_f32(chunk, v);
            }
        }
        Format::Int4 | Format::FixedGain => {
            for chunk in buf[..samples * 4].chunks_exact_mut(4) {
                let v = NativeEndian::read_i32(chunk);
                BigEndian::write_i32(chunk, v);
            }
        }
        Format::Int2 => {
            for chunk in buf[..samples * 2].chunks_exact_mut(2) {
                let v = NativeEndian::read_i16(chunk);
                BigEndian::write_i16(chunk, v);
            }
        }
        Format::Int1 => {}
    }
}

/// IBM System/360 hexadecimal float to IEEE single.
pub fn ibm_to_ieee(bits: u32) -> f32 {
    if bits & 0x00ff_ffff == 0 {
        return 0.0;
    }
    let sign = if bits >> 31 == 1 { -1.0f64 } else { 1.0f64 };
    let exponent = ((bits >> 24) & 0x7f) as i32 - 64;
    let mantissa = f64::from(bits & 0x00ff_ffff) / f64::from(1u32 << 24);
    (sign * mantissa * 16f64.powi(exponent)) as f32
}

/// IEEE single to IBM hexadecimal float.  Magnitudes outside IBM's range
/// clamp; zero, NaN and infinities encode as zero.
pub fn ieee_to_ibm(x: f32) -> u32 {
    if x == 0.0 || !x.is_finite() {
        return 0;
    }
    let sign = if x < 0.0 { 0x8000_0000u32 } else { 0 };
    let mut frac = f64::from(x.abs());
    let mut exp: i32 = 64;
    while frac >= 1.0 {
        frac /= 16.0;
        exp += 1;
    }
    while frac < 0.0625 {
        frac *= 16.0;
        exp -= 1;
    }
    if exp > 127 {
        return sign | 0x7fff_ffff;
    }
    if exp < 0 {
        return sign;
    }
    let mantissa = (frac * f64::from(1u32 << 24)) as u32 & 0x00ff_ffff;
    sign | ((exp as u32) << 24) | mantissa
}

// ── Header fields ────────────────────────────────────────────────────────────

/// Decode one named field from a raw trace header.
pub fn header_field(raw: &[u8; TRACE_HEADER_SIZE], field: Field) -> i32 {
    let at = field.position() - 1;
    match field.width() {
        4 => BigEndian::read_i32(&raw[at..]),
        _ => i32::from(BigEndian::read_i16(&raw[at..])),
    }
}

// ── Geometry classification ──────────────────────────────────────────────────

fn line_pair(
    file:        &mut File,
    i:           i32,
    il:          Field,
    xl:          Field,
    trace0:      u64,
    trace_bsize: usize,
) -> Result<(i32, i32), CodecStatus> {
    let mut raw = [0u8; TRACE_HEADER_SIZE];
    read_traceheader(file, i, &mut raw, trace0, trace_bsize)?;
    Ok((header_field(&raw, il), header_field(&raw, xl)))
}

/// Classify the trace sort order by scanning every trace's line numbers.
///
/// Returns the raw sorting code (inline = 2, crossline = 1).  A file whose
/// line numbers follow neither lexicographic order fails with
/// `InvalidSorting`; an ambiguous single-position file classifies as inline.
pub fn classify_sorting(
    file:        &mut File,
    il:          Field,
    xl:          Field,
    of:          Field,
    trace0:      u64,
    trace_bsize: usize,
    trace_count: u64,
) -> Result<i32, CodecStatus> {
    if il == xl || il == of || xl == of {
        return Err(CodecStatus::InvalidField(xl.position() as i32));
    }
    if trace_count == 0 {
        return Err(CodecStatus::InvalidSorting);
    }

    let mut il_sorted = true;
    let mut xl_sorted = true;
    let mut prev: Option<(i32, i32)> = None;

    for i in 0..trace_count {
        let cur = line_pair(file, i as i32, il, xl, trace0, trace_bsize)?;
        if let Some((pil, pxl)) = prev {
            let (cil, cxl) = cur;
            if cil < pil || (cil == pil && cxl < pxl) {
                il_sorted = false;
            }
            if cxl < pxl || (cxl == pxl && cil < pil) {
                xl_sorted = false;
            }
        }
        prev = Some(cur);
    }

    if il_sorted {
        Ok(Sorting::Inline.code())
    } else if xl_sorted {
        Ok(Sorting::Crossline.code())
    } else {
        Err(CodecStatus::InvalidSorting)
    }
}

/// Number of traces sharing the first trace's (inline, crossline) position,
/// i.e. the offset count of a prestack file.  1 for poststack data.
pub fn count_offsets(
    file:        &mut File,
    il:          Field,
    xl:          Field,
    trace0:      u64,
    trace_bsize: usize,
    trace_count: u64,
) -> Result<u64, CodecStatus> {
    if trace_count == 0 {
        return Ok(0);
    }
    let first = line_pair(file, 0, il, xl, trace0, trace_bsize)?;
    let mut offsets = 1u64;
    for i in 1..trace_count {
        if line_pair(file, i as i32, il, xl, trace0, trace_bsize)? != first {
            break;
        }
        offsets += 1;
    }
    Ok(offsets)
}

/// Count inline and crossline lines of a sorted file.  Returns
/// `(inline_count, crossline_count)`.
///
/// Fails with `NotFound` when the line numbers never change (an offsets-only
/// file), and with `InvalidArgs` when the trace count does not factor into
/// `lines * positions * offsets`.
pub fn count_lines(
    file:        &mut File,
    il:          Field,
    xl:          Field,
    sorting:     Sorting,
    offsets:     u64,
    trace0:      u64,
    trace_bsize: usize,
    trace_count: u64,
) -> Result<(u64, u64), CodecStatus> {
    if offsets == 0 || trace_count % offsets != 0 {
        return Err(CodecStatus::InvalidArgs);
    }

    // The slow index changes once per line; the fast one within a line.
    let (slow, fast) = match sorting {
        Sorting::Inline    => (il, xl),
        Sorting::Crossline => (xl, il),
    };

    let mut raw = [0u8; TRACE_HEADER_SIZE];
    read_traceheader(file, 0, &mut raw, trace0, trace_bsize)?;
    let first_slow = header_field(&raw, slow);
    let first_fast = header_field(&raw, fast);

    let mut run = trace_count;
    let mut fast_changes = false;
    for i in 1..trace_count {
        read_traceheader(file, i as i32, &mut raw, trace0, trace_bsize)?;
        if header_field(&raw, fast) != first_fast {
            fast_changes = true;
        }
        if header_field(&raw, slow) != first_slow {
            run = i;
            break;
        }
    }

    if run == trace_count && !fast_changes {
        // Neither line number ever moved.
        return Err(CodecStatus::NotFound);
    }
    if run % offsets != 0 || trace_count % run != 0 {
        return Err(CodecStatus::InvalidArgs);
    }

    let fast_count = run / offsets;
    let slow_count = trace_count / run;
    match sorting {
        Sorting::Inline    => Ok((slow_count, fast_count)),
        Sorting::Crossline => Ok((fast_count, slow_count)),
    }
}
