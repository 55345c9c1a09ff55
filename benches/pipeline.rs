use criterion::{Criterion, criterion_group, criterion_main};
use sinklog::{Encoded, Error, FileSink, Level, Logger, Sink, Value};
use std::hint::black_box;
use std::time::Duration;
use tempfile::TempDir;

struct NullSink;

impl Sink for NullSink {
    fn init(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn write(&mut self, record: &Encoded) -> Result<(), Error> {
        black_box(record.as_bytes());
        Ok(())
    }
}

fn bench_submit_null_sink(c: &mut Criterion) {
    let logger = Logger::builder()
        .level(Level::Info)
        .flush_interval(Duration::ZERO)
        .sink(NullSink)
        .build()
        .expect("failed to build logger");

    c.bench_function("Logger::info -> null sink", |b| {
        b.iter(|| logger.info("request {} served", &[Value::from(black_box(42_u32))]));
    });
    logger.close();
}

fn bench_submit_filtered(c: &mut Criterion) {
    let logger = Logger::builder()
        .level(Level::Warn)
        .sink(NullSink)
        .build()
        .expect("failed to build logger");

    c.bench_function("Logger::debug below threshold", |b| {
        b.iter(|| logger.debug(black_box("never encoded"), &[]));
    });
}

fn bench_file_sink_write(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let mut sink = FileSink::new(tmp.path().join("bench.log"));
    sink.init().expect("init failed");
    let record = Encoded::new(
        Level::Info,
        "[2025-01-15T14:30:00.000+0000] [INFO] [bench.rs:1] benchmark line\n",
    );

    c.bench_function("FileSink::write", |b| {
        b.iter(|| sink.write(black_box(&record)).expect("write failed"));
    });
    sink.flush().expect("flush failed");
}

criterion_group!(
    benches,
    bench_submit_null_sink,
    bench_submit_filtered,
    bench_file_sink_write,
);
criterion_main!(benches);
