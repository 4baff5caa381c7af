//! Performance benchmarks for bms-estimator
//!
//! Run with: cargo bench

use bms_estimator::{get_current, lookup_r, lookup_v_soc, BmsEstimator, EstimatorConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// ============================================================================
// Lookup Benchmarks
// ============================================================================

fn bench_lookup_v_soc(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_v_soc");

    group.bench_function("low_boundary", |b| {
        b.iter(|| lookup_v_soc(black_box(12.06), black_box(293.0)))
    });

    group.bench_function("midpoint", |b| {
        b.iter(|| lookup_v_soc(black_box(12.75), black_box(293.0)))
    });

    group.bench_function("high_boundary", |b| {
        b.iter(|| lookup_v_soc(black_box(13.41), black_box(293.0)))
    });

    group.finish();
}

fn bench_lookup_r(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_r");

    group.bench_function("low_soc_cold", |b| {
        b.iter(|| lookup_r(black_box(5.0), black_box(263.0)))
    });

    group.bench_function("high_soc_hot", |b| {
        b.iter(|| lookup_r(black_box(95.0), black_box(313.0)))
    });

    group.finish();
}

fn bench_get_current(c: &mut Criterion) {
    c.bench_function("get_current", |b| {
        b.iter(|| get_current(black_box(12.75), black_box(293.0)))
    });
}

// ============================================================================
// Estimator Construction Benchmarks
// ============================================================================

fn bench_estimator_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator_construction");

    group.bench_function("new", |b| {
        b.iter(|| BmsEstimator::new(black_box(50.0), black_box(100.0)))
    });

    group.bench_function("with_config", |b| {
        let config = EstimatorConfig::default().with_capacity_adaptation_rate(0.05);
        b.iter(|| BmsEstimator::with_config(black_box(50.0), black_box(100.0), config))
    });

    group.finish();
}

// ============================================================================
// Update (the hot path) Benchmarks
// ============================================================================

fn bench_update_active(c: &mut Criterion) {
    c.bench_function("update_active_charging", |b| {
        let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        b.iter(|| {
            estimator
                .update(black_box(12.5), black_box(5.0), black_box(25.0), black_box(0.1))
                .unwrap()
        })
    });
}

fn bench_update_resting(c: &mut Criterion) {
    c.bench_function("update_resting", |b| {
        let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
        b.iter(|| {
            estimator
                .update(black_box(12.75), black_box(0.0), black_box(25.0), black_box(0.1))
                .unwrap()
        })
    });
}

fn bench_update_throughput(c: &mut Criterion) {
    c.bench_function("update_throughput_1000_ticks", |b| {
        b.iter(|| {
            let mut estimator = BmsEstimator::new(50.0, 100.0).unwrap();
            for i in 0..1000 {
                let v = 12.5 + 0.2 * ((i as f32) * 0.01).sin();
                estimator
                    .update(black_box(v), black_box(5.0), black_box(25.0), black_box(0.1))
                    .unwrap();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_lookup_v_soc,
    bench_lookup_r,
    bench_get_current,
    bench_estimator_construction,
    bench_update_active,
    bench_update_resting,
    bench_update_throughput,
);

criterion_main!(benches);
