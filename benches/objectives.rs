use std::hint::black_box;

use acquisition::constraints::constraint;
use acquisition::objective::{
    ConstrainedMCObjective, LinearMCObjective, MCAcquisitionObjective, ObjectiveFn,
};
use acquisition::posterior::GaussianPosterior;
use acquisition::posterior_transform::{PosteriorTransform, ScalarizedPosteriorTransform};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ndarray::{Array1, ArrayD, Axis, IxDyn};

/// Random samples of shape `(n_samples, q, m)`.
fn build_samples(n_samples: usize, q: usize, m: usize) -> ArrayD<f64> {
    let mut rng = fastrand::Rng::with_seed(42);
    ArrayD::from_shape_simple_fn(IxDyn(&[n_samples, q, m]), || rng.f64() * 2.0 - 1.0)
}

fn weights(m: usize) -> Array1<f64> {
    Array1::from_shape_fn(m, |i| 1.0 / (i + 1) as f64)
}

fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_objective");
    for &n_samples in &[64, 512, 4096] {
        let samples = build_samples(n_samples, 4, 3);
        let objective = LinearMCObjective::new(weights(3)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n_samples), &samples, |b, s| {
            b.iter(|| objective.evaluate(black_box(s.view()), None).unwrap());
        });
    }
    group.finish();
}

fn bench_constrained(c: &mut Criterion) {
    let mut group = c.benchmark_group("constrained_objective");
    for &n_constraints in &[1, 4, 16] {
        let samples = build_samples(1024, 4, 3);
        let objective = ConstrainedMCObjective::builder(ObjectiveFn::new(|s, _x| {
            s.index_axis(Axis(s.ndim() - 1), 0).to_owned()
        }))
        .constraints((0..n_constraints).map(|k| {
            let shift = k as f64 * 0.1;
            constraint(move |s| s.index_axis(Axis(s.ndim() - 1), 1).mapv(|v| v - shift))
        }))
        .infeasible_cost(-1.0)
        .build()
        .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n_constraints), &samples, |b, s| {
            b.iter(|| objective.evaluate(black_box(s.view()), None).unwrap());
        });
    }
    group.finish();
}

fn bench_scalarized_posterior(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalarized_posterior");
    let m = 4;
    for &q in &[1, 8, 32] {
        let mean = ArrayD::from_elem(IxDyn(&[16, q, m]), 0.5);
        let covariance = ArrayD::from_shape_fn(IxDyn(&[16, q * m, q * m]), |ix| {
            if ix[1] == ix[2] { 1.0 } else { 0.01 }
        });
        let posterior = GaussianPosterior::new(mean, covariance).unwrap();
        let transform = ScalarizedPosteriorTransform::new(weights(m)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(q), &posterior, |b, p| {
            b.iter(|| transform.transform(black_box(p)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_linear,
    bench_constrained,
    bench_scalarized_posterior
);
criterion_main!(benches);
