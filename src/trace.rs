//! Record access: one-trace reads and writes.
//!
//! `get` and `put` move whole traces through the handle's scratch buffer.
//! The stored data format decides the native element type; sample values
//! cross the API as `f64`, which represents all four supported encodings
//! exactly.

use byteorder::{ByteOrder, NativeEndian};

use crate::codec::{self, CodecStatus};
use crate::compose::{Caps, Skill};
use crate::error::{Error, Result};
use crate::handle::TraceFile;
use crate::types::Format;

pub(crate) fn trace_io(what: String, status: CodecStatus) -> Error {
    match status {
        CodecStatus::Seek(e)  => Error::Seek { what, source: e },
        CodecStatus::Read(e)  => Error::Read { what, source: e },
        CodecStatus::Write(e) => Error::Write { what, source: e },
        other => Error::UnhandledCodec(other.code()),
    }
}

impl<S: Skill> TraceFile<S> {
    /// Read trace `i` and return a lazy traversal over its samples.
    ///
    /// The index passes through every composed skill first, so a handle with
    /// [`BoundsCheck`](crate::skills::BoundsCheck) rejects out-of-range
    /// indexes with a specific error; without it, a bad index is handed to
    /// the codec unchecked.
    ///
    /// The returned [`Samples`] yields exactly `samples()` values and
    /// borrows the handle's buffer: it cannot be restarted, and the handle
    /// cannot be touched until it is dropped.
    pub fn get(&mut self, i: i32) -> Result<Samples<'_>> {
        const {
            assert!(
                S::TAGS.intersects(Caps::TRACE_READER.union(Caps::TRACE_WRITER)),
                "get() requires a trace reader or trace writer skill"
            )
        };

        self.skills.check_index(i, &self.core)?;
        let meta = match self.core.meta() {
            Some(m) => *m,
            None => return Err(Error::SkillOrder { skill: "trace reader" }),
        };

        let (file, buffer) = self.core.io_parts()?;
        codec::read_trace(file, i, buffer, meta.trace0, meta.trace_bsize)
            .map_err(|s| trace_io(format!("reading trace {i}"), s))?;
        codec::to_native(meta.format, meta.samples, buffer);

        match meta.format {
            Format::Ibm | Format::Ieee | Format::Int4 | Format::Int2 | Format::Int1 => {
                Ok(Samples {
                    raw:    &buffer[..meta.trace_bsize],
                    format: meta.format,
                    left:   meta.samples,
                })
            }
            Format::FixedGain => Err(Error::BrokenFormat(meta.format)),
        }
    }

    /// Write trace `i` from `values`, which must supply at least
    /// `samples()` elements; extra elements are not consumed.
    ///
    /// Compiles only for compositions where some skill grants writability.
    pub fn put<I>(&mut self, i: i32, values: I) -> Result<()>
    where
        I: IntoIterator<Item = f64>,
    {
        const {
            assert!(
                S::TAGS.contains(Caps::TRACE_WRITER),
                "put() requires the trace writer skill"
            )
        };
        const {
            assert!(
                S::GRANTS.contains(Caps::WRITABLE),
                "trace writer needs a writable skill"
            )
        };

        self.skills.check_index(i, &self.core)?;
        let meta = match self.core.meta() {
            Some(m) => *m,
            None => return Err(Error::SkillOrder { skill: "trace writer" }),
        };

        let width = meta.format.bytes_per_sample();
        let (file, buffer) = self.core.io_parts()?;

        let mut values = values.into_iter();
        for n in 0..meta.samples {
            let v = values.next().ok_or(Error::ShortInput {
                got:      n,
                expected: meta.samples,
            })?;
            let at = n * width;
            match meta.format {
                Format::Ibm | Format::Ieee => NativeEndian::write_f32(&mut buffer[at..], v as f32),
                Format::Int4 => NativeEndian::write_i32(&mut buffer[at..], v as i32),
                Format::Int2 => NativeEndian::write_i16(&mut buffer[at..], v as i16),
                Format::Int1 => buffer[at] = v as i8 as u8,
                Format::FixedGain => return Err(Error::BrokenFormat(meta.format)),
            }
        }

        codec::from_native(meta.format, meta.samples, buffer);
        codec::write_trace(file, i, buffer, meta.trace0, meta.trace_bsize)
            .map_err(|s| trace_io(format!("writing trace {i}"), s))
    }
}

// ── Samples ──────────────────────────────────────────────────────────────────

/// Lazy, finite, non-restartable traversal over one trace's samples.
#[derive(Debug)]
pub struct Samples<'a> {
    raw:    &'a [u8],
    format: Format,
    left:   usize,
}

impl Iterator for Samples<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.left == 0 {
            return None;
        }
        let (head, rest) = self.raw.split_at(self.format.bytes_per_sample());
        self.raw = rest;
        self.left -= 1;
        Some(match self.format {
            Format::Ibm | Format::Ieee => f64::from(NativeEndian::read_f32(head)),
            Format::Int4 | Format::FixedGain => f64::from(NativeEndian::read_i32(head)),
            Format::Int2 => f64::from(NativeEndian::read_i16(head)),
            Format::Int1 => f64::from(head[0] as i8),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.left, Some(self.left))
    }
}

impl ExactSizeIterator for Samples<'_> {}

impl std::iter::FusedIterator for Samples<'_> {}
