//! The propagated state: reference/real particle pair, first moment and sigma matrix.

use ndarray::{Array1, Array2};

use crate::error::StateError;
use crate::particle::Particle;

/// Transverse X coordinate index.
pub const PS_X: usize = 0;
/// Transverse X' (momentum) coordinate index.
pub const PS_PX: usize = 1;
/// Transverse Y coordinate index.
pub const PS_Y: usize = 2;
/// Transverse Y' (momentum) coordinate index.
pub const PS_PY: usize = 3;
/// Longitudinal phase-offset coordinate index \[rad\].
pub const PS_S: usize = 4;
/// Fractional energy-offset coordinate index \[MeV/MeV\].
pub const PS_PS: usize = 5;
/// Dispersive/charge channel index, always 1 in `moment0`.
pub const PS_CHARGE: usize = 6;

/// Width of the phase-space coordinate system this core operates on.
pub const PHASE_SPACE_DIM: usize = 7;

/// A borrowed view of one of `MomentState`'s introspectable arrays.
#[derive(Debug, Clone, Copy)]
pub enum ArrayView<'a> {
    Scalar(f64),
    Vector(&'a Array1<f64>),
    Matrix(&'a Array2<f64>),
}

/// An owned value of one of `MomentState`'s introspectable arrays, used to
/// write a named array back (the inverse of `ArrayView`).
#[derive(Debug, Clone)]
pub enum ArrayValue {
    Scalar(f64),
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
}

/// Reference- and real-particle moment state propagated one element at a time.
///
/// `state` is the second-moment (sigma) matrix; `moment0` is the first-moment
/// vector. Both are kept in the 7D coordinate system indexed by the `PS_*`
/// constants. `pos` is the accumulated path length \[mm\]; `last_caviphi` is
/// the most recent cavity reference phase written back by an `rfcavity`
/// element (`phi_ref` in configuration terms).
#[derive(Debug, Clone)]
pub struct MomentState {
    pub ref_particle: Particle,
    pub real_particle: Particle,
    pub moment0: Array1<f64>,
    pub sigma: Array2<f64>,
    pub pos: f64,
    pub last_caviphi: f64,
}

impl MomentState {
    /// Builds a state with the given particles, `moment0` defaulted to the
    /// unit dispersive vector and `sigma` to identity.
    pub fn new(ref_particle: Particle, real_particle: Particle) -> Self {
        let mut moment0 = Array1::<f64>::zeros(PHASE_SPACE_DIM);
        moment0[PS_CHARGE] = 1.0;
        Self {
            ref_particle,
            real_particle,
            moment0,
            sigma: Array2::eye(PHASE_SPACE_DIM),
            pos: 0.0,
            last_caviphi: 0.0,
        }
    }

    /// Builds a state from explicit moment0/sigma, validating their shapes.
    pub fn with_moments(
        ref_particle: Particle,
        real_particle: Particle,
        moment0: Array1<f64>,
        sigma: Array2<f64>,
    ) -> Result<Self, StateError> {
        if moment0.len() != PHASE_SPACE_DIM {
            return Err(StateError::ShapeMismatch {
                what: "moment0".into(),
                got: vec![moment0.len()],
                expected: vec![PHASE_SPACE_DIM],
            });
        }
        if sigma.nrows() != PHASE_SPACE_DIM || sigma.ncols() != PHASE_SPACE_DIM {
            return Err(StateError::ShapeMismatch {
                what: "sigma".into(),
                got: vec![sigma.nrows(), sigma.ncols()],
                expected: vec![PHASE_SPACE_DIM, PHASE_SPACE_DIM],
            });
        }
        Ok(Self {
            ref_particle,
            real_particle,
            moment0,
            sigma,
            pos: 0.0,
            last_caviphi: 0.0,
        })
    }

    /// The ordered enumeration of named arrays used by export/import tooling.
    pub fn named_arrays(&self) -> Vec<(&'static str, ArrayView<'_>)> {
        vec![
            ("state", ArrayView::Matrix(&self.sigma)),
            ("moment0", ArrayView::Vector(&self.moment0)),
            ("ref_IonZ", ArrayView::Scalar(self.ref_particle.z)),
            ("ref_IonEs", ArrayView::Scalar(self.ref_particle.e_s)),
            ("ref_IonW", ArrayView::Scalar(self.ref_particle.w)),
            ("ref_gamma", ArrayView::Scalar(self.ref_particle.gamma)),
            ("ref_beta", ArrayView::Scalar(self.ref_particle.beta)),
            ("ref_bg", ArrayView::Scalar(self.ref_particle.bg)),
            ("ref_SampleIonK", ArrayView::Scalar(self.ref_particle.k_s)),
            ("ref_phis", ArrayView::Scalar(self.ref_particle.phi_s)),
            ("ref_IonEk", ArrayView::Scalar(self.ref_particle.e_k)),
            ("real_IonZ", ArrayView::Scalar(self.real_particle.z)),
            ("real_IonEs", ArrayView::Scalar(self.real_particle.e_s)),
            ("real_IonW", ArrayView::Scalar(self.real_particle.w)),
            ("real_gamma", ArrayView::Scalar(self.real_particle.gamma)),
            ("real_beta", ArrayView::Scalar(self.real_particle.beta)),
            ("real_bg", ArrayView::Scalar(self.real_particle.bg)),
            ("real_SampleIonK", ArrayView::Scalar(self.real_particle.k_s)),
            ("real_phis", ArrayView::Scalar(self.real_particle.phi_s)),
            ("real_IonEk", ArrayView::Scalar(self.real_particle.e_k)),
        ]
    }

    /// Writes a value back into the named array, recomputing derived
    /// kinematics when an energy field changes. Used by the round-trip
    /// import path; unknown names are a caller bug, not a recoverable error.
    pub fn set_named(&mut self, name: &str, value: ArrayValue) {
        match (name, value) {
            ("state", ArrayValue::Matrix(m)) => self.sigma = m,
            ("moment0", ArrayValue::Vector(v)) => self.moment0 = v,
            ("ref_IonZ", ArrayValue::Scalar(s)) => self.ref_particle.z = s,
            ("ref_IonEs", ArrayValue::Scalar(s)) => {
                self.ref_particle.e_s = s;
                self.ref_particle.recompute();
            }
            ("ref_IonEk", ArrayValue::Scalar(s)) => {
                self.ref_particle.e_k = s;
                self.ref_particle.recompute();
            }
            ("ref_phis", ArrayValue::Scalar(s)) => self.ref_particle.phi_s = s,
            ("real_IonZ", ArrayValue::Scalar(s)) => self.real_particle.z = s,
            ("real_IonEs", ArrayValue::Scalar(s)) => {
                self.real_particle.e_s = s;
                self.real_particle.recompute();
            }
            ("real_IonEk", ArrayValue::Scalar(s)) => {
                self.real_particle.e_k = s;
                self.real_particle.recompute();
            }
            ("real_phis", ArrayValue::Scalar(s)) => self.real_particle.phi_s = s,
            // Every other named entry (ref_IonW, ref_gamma, ref_beta, ref_bg,
            // ref_SampleIonK and their real_ counterparts) is purely derived
            // from e_s/e_k via `Particle::recompute` and is not written back.
            _ => {}
        }
    }
}
