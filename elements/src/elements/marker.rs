//! Zero-length identity element; diagnostic/bookkeeping marker in a lattice.

use state::{Element, MomentState, StateError};

use crate::core::{ElementCore, impl_element_core_methods};

pub struct Marker {
    core: ElementCore,
}

impl Marker {
    pub fn new(name: impl Into<String>) -> Result<Self, crate::error::ConfigError> {
        Ok(Self {
            core: ElementCore::new(name, 0.0)?,
        })
    }
}

impl Element for Marker {
    impl_element_core_methods!();

    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        self.core.transfer_raw = ndarray::Array2::eye(state::PHASE_SPACE_DIM);
        self.core.last_kenergy_in = state.real_particle.e_k;
        self.core.last_kenergy_out = state.real_particle.e_k;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use state::{Particle, advance};

    #[test]
    fn marker_is_identity_and_zero_length() {
        let mut marker = Marker::new("m1").unwrap();
        let p = Particle::new(931.5e6, 1.5e6, 1.0, 0.0);
        let mut state = MomentState::new(p, p);
        state.moment0[0] = 2.5;
        let before = state.moment0.clone();

        advance(&mut state, &mut marker).unwrap();

        assert_eq!(state.moment0, before);
        assert_eq!(state.pos, 0.0);
    }
}
