//! Benchmarks pour la conversion HK 1980 → WGS84

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hk1980::hk1980_to_wgs84;

/// Emprise de travail de la grille, maillée à 500 m
fn grid_points() -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    let mut easting = 800_000.0;
    while easting <= 860_000.0 {
        let mut northing = 800_000.0;
        while northing <= 850_000.0 {
            points.push((easting, northing));
            northing += 500.0;
        }
        easting += 500.0;
    }
    points
}

fn bench_convert_single(c: &mut Criterion) {
    c.bench_function("convert_single", |b| {
        b.iter(|| hk1980_to_wgs84(black_box(833_000.0), black_box(817_000.0)).unwrap())
    });
}

fn bench_convert_batch(c: &mut Criterion) {
    let points = grid_points();

    let mut group = c.benchmark_group("convert_batch");
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let mut count = 0usize;
            for &(e, n) in &points {
                if hk1980_to_wgs84(black_box(e), black_box(n)).is_ok() {
                    count += 1;
                }
            }
            black_box(count)
        })
    });

    group.finish();
}

fn bench_convert_parallel(c: &mut Criterion) {
    use rayon::prelude::*;

    let points = grid_points();

    let mut group = c.benchmark_group("convert_parallel");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.sample_size(10);

    group.bench_function("rayon", |b| {
        b.iter(|| {
            let count: usize = points
                .par_iter()
                .filter_map(|&(e, n)| hk1980_to_wgs84(black_box(e), black_box(n)).ok())
                .count();
            black_box(count)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_convert_single,
    bench_convert_batch,
    bench_convert_parallel
);
criterion_main!(benches);
