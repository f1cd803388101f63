//! Benchmarks for Smith-Wilson calibration and curve evaluation.
//!
//! Run with: cargo bench -p rfr-curves

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rfr_curves::alpha::{minimal_alpha, AlphaCriterion};
use rfr_curves::calibration::{calibrate, SmithWilsonParams};
use rfr_curves::compounding::Compounding;
use rfr_curves::curve::{build_curve, SmithWilsonCurve};
use rfr_curves::observations::ObservationSet;
use rfr_curves::traits::TermStructure;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Synthetic swap quotes rising towards a long-run level, one per year.
fn synthetic_quotes(count: usize) -> Vec<(f64, f64)> {
    (1..=count)
        .map(|i| {
            let t = i as f64;
            let rate = 0.02 + 0.015 * (1.0 - (-t / 8.0).exp());
            (t, rate)
        })
        .collect()
}

fn synthetic_observations(count: usize) -> ObservationSet {
    ObservationSet::from_pairs(&synthetic_quotes(count)).unwrap()
}

fn eur_curve() -> SmithWilsonCurve {
    build_curve(&synthetic_quotes(20), 0.1285, 0.0330).unwrap()
}

// =============================================================================
// CALIBRATION BENCHMARKS
// =============================================================================

fn bench_calibration(c: &mut Criterion) {
    let params = SmithWilsonParams::new(0.1285, 0.0330).unwrap();

    let mut group = c.benchmark_group("calibrate");

    for size in [5, 10, 20, 50].iter() {
        let observations = synthetic_observations(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &observations,
            |b, observations| b.iter(|| calibrate(black_box(observations), params)),
        );
    }
    group.finish();
}

fn bench_build_curve(c: &mut Criterion) {
    let quotes = synthetic_quotes(10);

    c.bench_function("build_curve_10", |b| {
        b.iter(|| build_curve(black_box(&quotes), 0.1285, 0.0330))
    });
}

// =============================================================================
// EVALUATION BENCHMARKS
// =============================================================================

fn bench_evaluation(c: &mut Criterion) {
    let curve = eur_curve();

    let mut group = c.benchmark_group("evaluation");

    group.bench_function("discount_factor", |b| {
        b.iter(|| curve.discount_factor(black_box(25.0)))
    });

    group.bench_function("spot_rate", |b| {
        b.iter(|| curve.spot_rate(black_box(25.0)))
    });

    group.bench_function("instantaneous_forward", |b| {
        b.iter(|| curve.instantaneous_forward(black_box(60.0)))
    });

    // A full curve dump as published for regulatory reporting.
    let tenors: Vec<f64> = (1..=100).map(f64::from).collect();
    group.throughput(Throughput::Elements(tenors.len() as u64));
    group.bench_function("curve_points_100", |b| {
        b.iter(|| curve.curve_points(black_box(&tenors), Compounding::Annual))
    });

    group.finish();
}

// =============================================================================
// ALPHA SEARCH BENCHMARKS
// =============================================================================

fn bench_alpha_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_search");
    group.sample_size(30);

    for size in [5, 10, 20].iter() {
        let observations = synthetic_observations(*size);
        let criterion = AlphaCriterion::eiopa(*size as f64);

        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &observations,
            |b, observations| {
                b.iter(|| {
                    minimal_alpha(
                        black_box(observations),
                        0.0330,
                        Compounding::Annual,
                        &criterion,
                    )
                })
            },
        );
    }
    group.finish();
}

// =============================================================================
// CRITERION GROUPS
// =============================================================================

criterion_group!(calibration, bench_calibration, bench_build_curve);
criterion_group!(evaluation, bench_evaluation);
criterion_group!(alpha_search, bench_alpha_search);

criterion_main!(calibration, evaluation, alpha_search);
