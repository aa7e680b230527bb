//! Solenoid magnet: couples the transverse planes via a rotating-frame block.

use state::{Element, MomentState, PS_PS, PS_S, StateError};

use crate::config_value::ElementConfig;
use crate::core::{ElementCore, impl_element_core_methods, m_to_mm, ps_s_ps_drift_term};
use crate::error::ConfigError;
use crate::primitives::solenoid_matrix;

pub struct Solenoid {
    core: ElementCore,
    /// Axial field `B` \[T\].
    b: f64,
}

impl Solenoid {
    pub fn from_config(cfg: &ElementConfig) -> Result<Self, ConfigError> {
        let length_mm = m_to_mm(cfg.get_f64("L")?);
        let b = cfg.get_f64("B")?;
        Ok(Self {
            core: ElementCore::new(cfg.name(), length_mm)?,
            b,
        })
    }
}

impl Element for Solenoid {
    impl_element_core_methods!();

    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        let real = &state.real_particle;
        let brho = real.beta * (real.e_k + real.e_s) / (config::C0 * real.z);
        let k = self.b / (2.0 * brho) / config::M_TO_MM;

        let mut m = solenoid_matrix(self.core.length_mm, k);
        m[[PS_S, PS_PS]] = ps_s_ps_drift_term(self.core.length_mm, real.e_s, real.bg);

        self.core.transfer_raw = m;
        self.core.last_kenergy_in = real.e_k;
        self.core.last_kenergy_out = real.e_k;
        Ok(())
    }
}
