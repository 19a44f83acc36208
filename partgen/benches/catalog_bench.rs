use criterion::{black_box, criterion_group, criterion_main, Criterion};
use partgen::prelude::*;
use partgen::sinks::{sink_for, OutputFormat as Format};
use partgen::values::{enumerate, ESeries, ValueFilters, ValueRange};

fn bench_enumerate_e96(c: &mut Criterion) {
    let filters = ValueFilters::default();
    c.bench_function("enumerate_e96", |b| {
        b.iter(|| enumerate(black_box(ValueRange::new(1.0, 10e6)), ESeries::E96, &filters))
    });
}

fn bench_generate_builtin(c: &mut Criterion) {
    let registry = SeriesRegistry::with_builtin();
    let ids: [&str; 0] = [];

    c.bench_function("generate_builtin", |b| {
        b.iter(|| {
            PartgenCore::generate_catalog(black_box(&registry), &ids, GenerationOptions::default())
        });
    });

    let parallel = GenerationOptions {
        parallel: true,
        fail_fast: false,
    };
    c.bench_function("generate_builtin_parallel", |b| {
        b.iter(|| PartgenCore::generate_catalog(black_box(&registry), &ids, parallel));
    });
}

fn bench_write_csv(c: &mut Criterion) {
    let registry = SeriesRegistry::with_builtin();
    let outcome =
        PartgenCore::generate_catalog(&registry, &["ERJ-2RKF"], GenerationOptions::default())
            .expect("builtin series");
    let records: Vec<&PartRecord> = outcome.catalog.records().collect();
    let sink = sink_for(Format::Csv);

    c.bench_function("write_csv", |b| {
        b.iter(|| {
            let mut buf = Vec::new();
            sink.write(black_box(&records), &mut buf)
        });
    });
}

criterion_group!(benches, bench_enumerate_e96, bench_generate_builtin, bench_write_csv);
criterion_main!(benches);
