use byteorder::{BigEndian, ByteOrder};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seisio::skills::{HeaderReader, TraceMeta, TraceReader};
use seisio::TraceFile;
use tempfile::NamedTempFile;

const SAMPLES: usize = 1000;
const TRACES: i32 = 100;

fn reference_file() -> NamedTempFile {
    let mut bytes = vec![0u8; 3600];
    BigEndian::write_i16(&mut bytes[3220..], SAMPLES as i16);
    BigEndian::write_i16(&mut bytes[3224..], 5); // ieee float

    for traceno in 0..TRACES {
        let mut th = [0u8; 240];
        BigEndian::write_i32(&mut th[188..], traceno / 10 + 1);
        BigEndian::write_i32(&mut th[192..], traceno % 10 + 1);
        bytes.extend_from_slice(&th);
        for k in 0..SAMPLES {
            let mut b = [0u8; 4];
            BigEndian::write_f32(&mut b, (traceno * 7 + k as i32) as f32);
            bytes.extend_from_slice(&b);
        }
    }

    let tmp = NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), &bytes).unwrap();
    tmp
}

fn bench_trace_read(c: &mut Criterion) {
    let tmp = reference_file();
    let mut f = TraceFile::<(TraceMeta, TraceReader)>::open(tmp.path()).unwrap();

    c.bench_function("get_trace_1k_samples", |b| {
        b.iter(|| {
            let v: Vec<f64> = f.get(black_box(42)).unwrap().collect();
            v
        })
    });
}

fn bench_header_read(c: &mut Criterion) {
    let tmp = reference_file();
    let mut f = TraceFile::<(TraceMeta, HeaderReader)>::open(tmp.path()).unwrap();

    c.bench_function("get_th", |b| b.iter(|| f.get_th(black_box(42)).unwrap()));
}

criterion_group!(benches, bench_trace_read, bench_header_read);
criterion_main!(benches);
