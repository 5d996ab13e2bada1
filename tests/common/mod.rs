#![allow(dead_code)]

//! Synthesised reference files: 25 traces laid out as a 5×5 inline-sorted
//! cube (inlines 1..=5, crosslines 20..=24), 50 samples per trace.

use byteorder::{BigEndian, ByteOrder};
use seisio::codec::ieee_to_ibm;
use seisio::Format;
use tempfile::NamedTempFile;

pub const SAMPLES: usize = 50;
pub const ILINES: i32 = 5;
pub const XLINES: i32 = 5;
pub const TRACES: i32 = ILINES * XLINES;

/// The value stored at sample `k` of trace `traceno`.  Small integers, so
/// every supported encoding represents them exactly.
pub fn sample_value(traceno: i32, k: usize) -> f64 {
    f64::from(traceno * 2 + k as i32)
}

fn push_sample(bytes: &mut Vec<u8>, format: Format, v: f64) {
    match format {
        Format::Ieee => {
            let mut b = [0u8; 4];
            BigEndian::write_f32(&mut b, v as f32);
            bytes.extend_from_slice(&b);
        }
        Format::Ibm => {
            let mut b = [0u8; 4];
            BigEndian::write_u32(&mut b, ieee_to_ibm(v as f32));
            bytes.extend_from_slice(&b);
        }
        Format::Int4 | Format::FixedGain => {
            let mut b = [0u8; 4];
            BigEndian::write_i32(&mut b, v as i32);
            bytes.extend_from_slice(&b);
        }
        Format::Int2 => {
            let mut b = [0u8; 2];
            BigEndian::write_i16(&mut b, v as i16);
            bytes.extend_from_slice(&b);
        }
        Format::Int1 => bytes.push(v as i8 as u8),
    }
}

fn header_region(format: Format) -> Vec<u8> {
    let mut bytes = vec![0u8; 3600];
    BigEndian::write_i16(&mut bytes[3220..], SAMPLES as i16);
    BigEndian::write_i16(&mut bytes[3224..], format.code() as i16);
    bytes
}

fn push_trace(bytes: &mut Vec<u8>, format: Format, traceno: i32, il: i32, xl: i32) {
    let mut th = [0u8; 240];
    BigEndian::write_i16(&mut th[114..], SAMPLES as i16);
    BigEndian::write_i32(&mut th[188..], il);
    BigEndian::write_i32(&mut th[192..], xl);
    bytes.extend_from_slice(&th);
    for k in 0..SAMPLES {
        push_sample(bytes, format, sample_value(traceno, k));
    }
}

pub fn small_file_with_format(format: Format) -> NamedTempFile {
    let mut bytes = header_region(format);
    for il in 1..=ILINES {
        for xl in 20..20 + XLINES {
            let traceno = (il - 1) * XLINES + (xl - 20);
            push_trace(&mut bytes, format, traceno, il, xl);
        }
    }
    let tmp = NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), &bytes).unwrap();
    tmp
}

/// The standard IEEE-float reference file.
pub fn small_file() -> NamedTempFile {
    small_file_with_format(Format::Ieee)
}

/// Line numbers that follow neither lexicographic order.
pub fn unsorted_file() -> NamedTempFile {
    let mut bytes = header_region(Format::Ieee);
    for (traceno, il) in [1, 2, 1, 2].into_iter().enumerate() {
        push_trace(&mut bytes, Format::Ieee, traceno as i32, il, 20);
    }
    let tmp = NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), &bytes).unwrap();
    tmp
}

/// A reference file with the last trace cut short.
pub fn truncated_file() -> NamedTempFile {
    let tmp = small_file();
    let mut bytes = std::fs::read(tmp.path()).unwrap();
    bytes.truncate(bytes.len() - 10);
    std::fs::write(tmp.path(), &bytes).unwrap();
    tmp
}
