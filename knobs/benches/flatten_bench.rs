use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use knobs::config::{flatten, ConfigurationsBuilder};
use knobs::Configurations;
use serde_json::{json, Map, Value};

/// A document with `width` sections of `width` keys each, nested `depth` deep.
fn nested_document(width: usize, depth: usize) -> Map<String, Value> {
    fn level(width: usize, depth: usize) -> Value {
        if depth == 0 {
            return json!("value");
        }
        let map: Map<String, Value> = (0..width)
            .map(|i| (format!("key{i}"), level(width, depth - 1)))
            .collect();
        Value::Object(map)
    }
    match level(width, depth) {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    for (width, depth) in [(10, 1), (10, 2), (10, 3), (4, 6)] {
        let document = nested_document(width, depth);
        group.bench_with_input(
            BenchmarkId::new("nested", format!("{width}x{depth}")),
            &document,
            |b, document| b.iter(|| flatten(black_box(document))),
        );
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let configurations = Configurations::wrap(&nested_document(10, 3)).unwrap();

    let mut group = c.benchmark_group("lookup");

    group.bench_function("get_present", |b| {
        b.iter(|| configurations.get(black_box("key5.key5.key5")));
    });

    group.bench_function("get_absent", |b| {
        b.iter(|| configurations.get(black_box("key5.key5.missing")));
    });

    group.bench_function("extract_section", |b| {
        b.iter(|| configurations.extract(black_box("key3")));
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let base = Configurations::wrap(&nested_document(10, 3)).unwrap();

    c.bench_function("build_with_overrides", |b| {
        b.iter(|| {
            ConfigurationsBuilder::new()
                .base(base.clone())
                .put("key1.key1.key1", "override")
                .put("extra", "value")
                .build()
        });
    });
}

criterion_group!(benches, bench_flatten, bench_lookup, bench_build);
criterion_main!(benches);
