use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use ndarray::Array2;
use state::{Element, MomentState, PHASE_SPACE_DIM, Particle, StateError, advance};

/// A fixed-matrix element standing in for a drift, since concrete element
/// synthesizers live in a higher-level crate this one cannot depend on.
struct FixedMatrixElement {
    transfer: Array2<f64>,
    misalign: Array2<f64>,
    length_mm: f64,
    last_in: f64,
}

impl FixedMatrixElement {
    fn drift(length_mm: f64) -> Self {
        let mut transfer = Array2::eye(PHASE_SPACE_DIM);
        transfer[[0, 1]] = length_mm;
        transfer[[2, 3]] = length_mm;
        Self {
            transfer,
            misalign: Array2::eye(PHASE_SPACE_DIM),
            length_mm,
            last_in: f64::NAN,
        }
    }
}

impl Element for FixedMatrixElement {
    fn name(&self) -> &str {
        "drift"
    }
    fn length_mm(&self) -> f64 {
        self.length_mm
    }
    fn last_kenergy_in(&self) -> f64 {
        self.last_in
    }
    fn last_kenergy_out(&self) -> f64 {
        self.last_in
    }
    fn misalign(&self) -> &Array2<f64> {
        &self.misalign
    }
    fn misalign_inv(&self) -> &Array2<f64> {
        &self.misalign
    }
    fn transfer(&self) -> &Array2<f64> {
        &self.transfer
    }
    fn set_transfer(&mut self, transfer: Array2<f64>) {
        self.transfer = transfer;
    }
    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        self.last_in = state.real_particle.e_k;
        Ok(())
    }
}

fn advance_through_drift(c: &mut Criterion) {
    let p = Particle::new(931.5e6, 1.5e6, 1.0, 0.0);
    let mut state = MomentState::new(p, p);
    let mut drift = FixedMatrixElement::drift(1000.0);

    let mut group = c.benchmark_group("Moment propagation");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    group.bench_function("advance() through a drift", |b| {
        b.iter(|| {
            advance(&mut state, &mut drift).unwrap();
        })
    });
}

criterion_group!(benches, advance_through_drift);
criterion_main!(benches);
