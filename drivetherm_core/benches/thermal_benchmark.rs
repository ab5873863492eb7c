//! Thermal pipeline micro-benchmark.
//!
//! Measures throughput of the three cyclic workloads:
//! - a single integrator step
//! - one estimator service period (10 sub-steps)
//! - one predictor sweep (60 steps over the duty profile)

use criterion::{Criterion, criterion_group, criterion_main};

use drivetherm_core::config::{
    EstimatorConfig, PredictorConfig, RATED_INPUTS_DEFAULT,
};
use drivetherm_core::estimator::Estimator;
use drivetherm_core::predictor::OverloadPredictor;
use drivetherm_core::{THERMAL_PLANT, solver};

fn bench_solver_step(c: &mut Criterion) {
    let mut state = [0.0f32; 3];
    let mut outputs = [0.0f32; 4];

    c.bench_function("solver_step", |b| {
        b.iter(|| {
            solver::step(
                &THERMAL_PLANT,
                0.1,
                &mut state,
                &RATED_INPUTS_DEFAULT,
                &RATED_INPUTS_DEFAULT,
                &mut outputs,
            )
            .unwrap();
        })
    });
}

fn bench_estimator_period(c: &mut Criterion) {
    let mut estimator = Estimator::new(&EstimatorConfig::default());
    estimator.set_inputs(&RATED_INPUTS_DEFAULT);

    c.bench_function("estimator_period", |b| {
        b.iter(|| estimator.periodic_task())
    });
}

fn bench_predictor_sweep(c: &mut Criterion) {
    let mut predictor = OverloadPredictor::new(&PredictorConfig::default());

    c.bench_function("predictor_sweep", |b| {
        b.iter(|| predictor.background_task())
    });
}

criterion_group!(
    benches,
    bench_solver_step,
    bench_estimator_period,
    bench_predictor_sweep
);
criterion_main!(benches);
