//! Bookkeeping shared by every element synthesizer: length, transfer caches,
//! misalignment and the last-seen-energy cache that gates recomputation.
//!
//! Factored out so each element kind implements only `recompute_matrix`,
//! the same way `utils::array1D_getter_impl!` lets the teacher's evaluator
//! types skip writing their own getters.

use ndarray::Array2;
use state::PHASE_SPACE_DIM;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub(crate) struct ElementCore {
    pub name: String,
    pub length_mm: f64,
    pub transfer_raw: Array2<f64>,
    pub transfer: Array2<f64>,
    pub misalign: Array2<f64>,
    pub misalign_inv: Array2<f64>,
    pub last_kenergy_in: f64,
    pub last_kenergy_out: f64,
}

impl ElementCore {
    /// Builds a core with identity misalignment (the only case this core's
    /// configuration surface currently produces). Still runs the
    /// misalignment through `state::invert` so a future non-identity
    /// misalignment fails loudly instead of being silently skipped.
    pub fn new(name: impl Into<String>, length_mm: f64) -> Result<Self, ConfigError> {
        let misalign = Array2::eye(PHASE_SPACE_DIM);
        let misalign_inv = state::invert(&misalign)?;
        Ok(Self {
            name: name.into(),
            length_mm,
            transfer_raw: Array2::eye(PHASE_SPACE_DIM),
            transfer: Array2::eye(PHASE_SPACE_DIM),
            misalign,
            misalign_inv,
            last_kenergy_in: f64::NAN,
            last_kenergy_out: f64::NAN,
        })
    }
}

/// Forwards the common `Element` bookkeeping methods to a `core:
/// ElementCore` field, leaving only `recompute_matrix` to be written by
/// hand for each element kind.
macro_rules! impl_element_core_methods {
    () => {
        fn name(&self) -> &str {
            &self.core.name
        }
        fn length_mm(&self) -> f64 {
            self.core.length_mm
        }
        fn last_kenergy_in(&self) -> f64 {
            self.core.last_kenergy_in
        }
        fn last_kenergy_out(&self) -> f64 {
            self.core.last_kenergy_out
        }
        fn misalign(&self) -> &ndarray::Array2<f64> {
            &self.core.misalign
        }
        fn misalign_inv(&self) -> &ndarray::Array2<f64> {
            &self.core.misalign_inv
        }
        fn transfer(&self) -> &ndarray::Array2<f64> {
            &self.core.transfer
        }
        fn set_transfer(&mut self, transfer: ndarray::Array2<f64>) {
            self.core.transfer = transfer;
        }
    };
}

pub(crate) use impl_element_core_methods;

/// Converts a lattice length from meters (configuration units) to
/// millimeters (this core's internal unit).
pub(crate) fn m_to_mm(length_m: f64) -> f64 {
    length_m * config::M_TO_MM
}

/// The longitudinal drift term every non-cavity element fills into
/// `M[PS_S, PS_PS]`: `-2π·L / (λ_s·(E_s/1e6)·(βγ)³)`.
pub(crate) fn ps_s_ps_drift_term(length_mm: f64, e_s_ev: f64, bg: f64) -> f64 {
    -2.0 * std::f64::consts::PI * length_mm
        / (config::SAMPLE_LAMBDA_MM * (e_s_ev / config::MEV_TO_EV) * bg.powi(3))
}
