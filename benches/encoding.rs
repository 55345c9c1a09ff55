use chrono::Local;
use criterion::{Criterion, criterion_group, criterion_main};
use sinklog::fmt::{Body, Record, list, template};
use sinklog::{BufferPool, Encoder, Field, Level, Value};
use std::hint::black_box;

fn bench_encode_template(c: &mut Criterion) {
    let encoder = Encoder::default();
    let args = [Value::from("/data"), Value::from(93_u32)];
    let mut out = Vec::with_capacity(256);

    c.bench_function("Encoder::encode template", |b| {
        b.iter(|| {
            out.clear();
            let record = Record {
                time: Local::now(),
                level: Level::Error,
                file: "src/storage/volume.rs",
                line: 118,
                body: Body::Template {
                    template: "disk full on {0} ({1}% used)",
                    args: &args,
                },
            };
            encoder.encode(black_box(&record), &mut out);
        });
    });
}

fn bench_encode_fields(c: &mut Criterion) {
    let encoder = Encoder::default();
    let fields = [
        Field::string("user", "ana"),
        Field::int("status", 200),
        Field::float64("elapsed", 12.75),
        Field::bool("cached", true),
    ];
    let mut out = Vec::with_capacity(256);

    c.bench_function("Encoder::encode fields", |b| {
        b.iter(|| {
            out.clear();
            let record = Record {
                time: Local::now(),
                level: Level::Info,
                file: "src/http/handler.rs",
                line: 52,
                body: Body::Fields {
                    message: "request served",
                    fields: &fields,
                },
            };
            encoder.encode(black_box(&record), &mut out);
        });
    });
}

fn bench_template_render(c: &mut Criterion) {
    let args = [Value::from(1_i32), Value::from("two"), Value::from(3.5_f64)];
    c.bench_function("template::render", |b| {
        b.iter(|| template::render(black_box("{} then {} then {2} {{literal}}"), &args));
    });
}

fn bench_format_list(c: &mut Criterion) {
    let keys = ["method", "path", "status", "bytes"];
    let values = [
        Value::from("GET"),
        Value::from("/api/items"),
        Value::from(200_u16),
        Value::from(5120_u64),
    ];
    c.bench_function("list::format_list", |b| {
        b.iter(|| list::format_list(black_box(&keys), black_box(&values)));
    });
}

fn bench_pool_cycle(c: &mut Criterion) {
    let pool = BufferPool::new(64, 1024);
    c.bench_function("BufferPool acquire/release", |b| {
        b.iter(|| {
            let enc = pool.acquire(black_box(Level::Info));
            pool.release(enc);
        });
    });
}

criterion_group!(
    benches,
    bench_encode_template,
    bench_encode_fields,
    bench_template_render,
    bench_format_list,
    bench_pool_cycle,
);
criterion_main!(benches);
