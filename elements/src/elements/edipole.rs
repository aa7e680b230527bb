//! Electric dipole. Real bending physics is not modeled; the transfer is
//! identity.

use ndarray::Array2;
use state::{Element, MomentState, PHASE_SPACE_DIM, StateError};

use crate::config_value::ElementConfig;
use crate::core::{ElementCore, impl_element_core_methods, m_to_mm};
use crate::error::ConfigError;

pub struct EDipole {
    core: ElementCore,
}

impl EDipole {
    pub fn from_config(cfg: &ElementConfig) -> Result<Self, ConfigError> {
        let length_mm = cfg.try_get_f64("L")?.map(m_to_mm).unwrap_or(0.0);
        Ok(Self {
            core: ElementCore::new(cfg.name(), length_mm)?,
        })
    }
}

impl Element for EDipole {
    impl_element_core_methods!();

    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        self.core.transfer_raw = Array2::eye(PHASE_SPACE_DIM);
        self.core.last_kenergy_in = state.real_particle.e_k;
        self.core.last_kenergy_out = state.real_particle.e_k;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config_value::ConfigValue;
    use state::{Particle, advance};

    #[test]
    fn edipole_passes_moments_through_unchanged() {
        let cfg = ElementConfig::new("bend1").with("L", ConfigValue::Float(0.3));
        let mut edipole = EDipole::from_config(&cfg).unwrap();
        let p = Particle::new(931.5e6, 1.5e6, 1.0, 0.0);
        let mut state = MomentState::new(p, p);
        state.moment0[1] = 0.01;
        let before = state.moment0.clone();

        advance(&mut state, &mut edipole).unwrap();

        assert_eq!(state.moment0, before);
    }
}
