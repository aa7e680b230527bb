//! Charge stripper. Real stripper physics (charge-state distribution,
//! energy straggling) is not modeled; the transfer is identity.

use ndarray::Array2;
use state::{Element, MomentState, PHASE_SPACE_DIM, StateError};

use crate::config_value::ElementConfig;
use crate::core::{ElementCore, impl_element_core_methods, m_to_mm};
use crate::error::ConfigError;

pub struct Stripper {
    core: ElementCore,
}

impl Stripper {
    pub fn from_config(cfg: &ElementConfig) -> Result<Self, ConfigError> {
        let length_mm = cfg.try_get_f64("L")?.map(m_to_mm).unwrap_or(0.0);
        Ok(Self {
            core: ElementCore::new(cfg.name(), length_mm)?,
        })
    }
}

impl Element for Stripper {
    impl_element_core_methods!();

    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        self.core.transfer_raw = Array2::eye(PHASE_SPACE_DIM);
        self.core.last_kenergy_in = state.real_particle.e_k;
        self.core.last_kenergy_out = state.real_particle.e_k;
        Ok(())
    }
}
