//! The reference-phase lookup an RF cavity needs before it can run its
//! longitudinal boost. Determining it in general means solving for the
//! cavity phase that lands the reference particle on the configured
//! synchronous phase — an optimization problem this core does not solve;
//! callers that need it supply their own `CavityPhaseSolver`.

use state::Particle;

/// Resolves the cavity phase `caviFy` such that, after `GetCavBoost` runs,
/// the reference particle reaches the configured synchronous phase.
pub trait CavityPhaseSolver {
    /// `cavi` is the cavity-type index, `phi_sync` the configured
    /// synchronous phase \[rad\], `multip` the harmonic multiplier of the RF
    /// frequency over the sampling frequency.
    fn solve(&self, cavi: u8, ref_particle: &Particle, phi_sync: f64, multip: f64) -> f64;
}

/// A trivial solver returning the synchronous phase unchanged, for lattices
/// that configure `phi_ref` directly instead of deriving it.
pub struct IdentityPhaseSolver;

impl CavityPhaseSolver for IdentityPhaseSolver {
    fn solve(&self, _cavi: u8, _ref_particle: &Particle, phi_sync: f64, _multip: f64) -> f64 {
        phi_sync
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use state::Particle;

    #[test]
    fn identity_solver_returns_configured_phase() {
        let solver = IdentityPhaseSolver;
        let p = Particle::new(931.5e6, 1.5e6, 1.0, 0.0);
        assert_eq!(solver.solve(1, &p, 0.5, 4.0), 0.5);
    }
}
