//! The moment-propagation kernel: advances one `MomentState` through one
//! `Element`.

use crate::element::Element;
use crate::error::StateError;
use crate::moment_state::{MomentState, PS_PS, PS_S};

/// Advances `state` through `element` by exactly one step.
///
/// Mirrors the seven-step recipe: recompute kinematics, recompute and
/// conjugate the transfer matrix only when the input energy changed,
/// advance position and phase, then propagate `moment0` and `sigma`.
/// Cavities overwrite the longitudinal moment entries from the energy/phase
/// deltas their own `recompute_matrix` produced.
pub fn advance(state: &mut MomentState, element: &mut dyn Element) -> Result<(), StateError> {
    state.real_particle.recompute();

    if state.real_particle.e_k != element.last_kenergy_in() {
        element
            .recompute_matrix(state)
            .map_err(|e| StateError::Recompute {
                element: element.name().into(),
                detail: e.to_string().into(),
            })?;

        let conjugated = element
            .misalign()
            .dot(element.transfer())
            .dot(element.misalign_inv());
        element.set_transfer(conjugated);

        state.real_particle.recompute();
    }

    state.pos += element.length_mm();

    if !element.is_rfcavity() {
        state.ref_particle.phi_s += state.ref_particle.k_s * element.length_mm();
        state.real_particle.phi_s += state.real_particle.k_s * element.length_mm();
        state.real_particle.e_k = element.last_kenergy_out();
        state.real_particle.recompute();
    }

    state.moment0 = element.transfer().dot(&state.moment0);

    if element.is_rfcavity() {
        state.moment0[PS_S] = state.real_particle.phi_s - state.ref_particle.phi_s;
        state.moment0[PS_PS] = (state.real_particle.e_k - state.ref_particle.e_k) / config::MEV_TO_EV;
    }

    state.sigma = element.transfer().dot(&state.sigma).dot(&element.transfer().t());

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::moment_state::PHASE_SPACE_DIM;
    use crate::particle::Particle;
    use ndarray::Array2;

    struct Marker {
        transfer: Array2<f64>,
        misalign: Array2<f64>,
        last_in: f64,
    }

    impl Marker {
        fn new() -> Self {
            Self {
                transfer: Array2::eye(PHASE_SPACE_DIM),
                misalign: Array2::eye(PHASE_SPACE_DIM),
                last_in: f64::NAN,
            }
        }
    }

    impl Element for Marker {
        fn name(&self) -> &str {
            "marker"
        }
        fn length_mm(&self) -> f64 {
            0.0
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

    #[test]
    fn marker_leaves_moments_and_position_unchanged() {
        let p = Particle::new(931.5e6, 1.5e6, 1.0, 0.0);
        let mut state = MomentState::new(p, p);
        state.moment0[0] = 3.0;
        state.sigma[[1, 1]] = 4.0;
        let before_moment0 = state.moment0.clone();
        let before_sigma = state.sigma.clone();

        let mut marker = Marker::new();
        advance(&mut state, &mut marker).unwrap();

        assert_eq!(state.moment0, before_moment0);
        assert_eq!(state.sigma, before_sigma);
        assert_eq!(state.pos, 0.0);
    }

    #[test]
    fn repeated_advance_with_same_energy_recomputes_once() {
        let p = Particle::new(931.5e6, 1.5e6, 1.0, 0.0);
        let mut state = MomentState::new(p, p);
        let mut marker = Marker::new();

        advance(&mut state, &mut marker).unwrap();
        let seen_after_first = marker.last_in;
        advance(&mut state, &mut marker).unwrap();

        assert_eq!(marker.last_in, seen_after_first);
    }
}
