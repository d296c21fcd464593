use criterion::{black_box, criterion_group, criterion_main, Criterion};
use knobs::duration;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("duration_parse");

    group.bench_function("iso", |b| {
        b.iter(|| duration::parse(black_box("P2DT3H3M5.22S")));
    });

    group.bench_function("iso_hours_only", |b| {
        b.iter(|| duration::parse(black_box("PT51H3M5.22S")));
    });

    group.bench_function("spelled_out", |b| {
        b.iter(|| duration::parse(black_box("2 days 3 hours 3 minutes 5.22 seconds")));
    });

    group.bench_function("compact", |b| {
        b.iter(|| duration::parse(black_box("2d3h3m5.22s")));
    });

    // Rejected literals should fail fast
    group.bench_function("invalid", |b| {
        b.iter(|| duration::parse(black_box("2 fortnights")));
    });

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let parsed = duration::parse("P2DT3H3M5.22S").unwrap();

    c.bench_function("duration_format_iso", |b| {
        b.iter(|| duration::format_iso(black_box(parsed)));
    });
}

criterion_group!(benches, bench_parse, bench_format);
criterion_main!(benches);
