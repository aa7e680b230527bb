//! A transfer matrix copied verbatim from configuration, row-major, for
//! lattice elements this core has no dedicated synthesizer for.

use ndarray::Array2;
use state::{Element, MomentState, PHASE_SPACE_DIM, StateError};

use crate::config_value::ElementConfig;
use crate::core::{ElementCore, impl_element_core_methods, m_to_mm};
use crate::error::ConfigError;

pub struct Generic {
    core: ElementCore,
}

impl Generic {
    pub fn from_config(cfg: &ElementConfig) -> Result<Self, ConfigError> {
        let length_mm = cfg.try_get_f64("L")?.map(m_to_mm).unwrap_or(0.0);
        let flat = cfg.get_vec_f64("transfer")?;

        let capacity = PHASE_SPACE_DIM * PHASE_SPACE_DIM;
        if flat.len() > capacity {
            return Err(ConfigError::SizeMismatch {
                element: cfg.name().into(),
                key: "transfer".into(),
                got: flat.len(),
                expected: capacity,
            });
        }

        let mut transfer_raw = Array2::<f64>::zeros((PHASE_SPACE_DIM, PHASE_SPACE_DIM));
        for (slot, value) in transfer_raw.iter_mut().zip(flat.iter()) {
            *slot = *value;
        }

        let mut core = ElementCore::new(cfg.name(), length_mm)?;
        core.transfer_raw = transfer_raw;

        Ok(Self { core })
    }
}

impl Element for Generic {
    impl_element_core_methods!();

    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        self.core.last_kenergy_in = state.real_particle.e_k;
        self.core.last_kenergy_out = state.real_particle.e_k;
        Ok(())
    }
}
