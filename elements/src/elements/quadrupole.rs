//! Magnetic quadrupole: focuses one transverse plane, defocuses the other.

use ndarray::Array2;
use state::{Element, MomentState, PS_PS, PS_S, StateError};

use crate::config_value::ElementConfig;
use crate::core::{ElementCore, impl_element_core_methods, m_to_mm, ps_s_ps_drift_term};
use crate::error::ConfigError;
use crate::primitives::quad_matrix;

pub struct Quadrupole {
    core: ElementCore,
    /// Field gradient `B2` \[T/m\].
    b2: f64,
}

impl Quadrupole {
    pub fn from_config(cfg: &ElementConfig) -> Result<Self, ConfigError> {
        let length_mm = m_to_mm(cfg.get_f64("L")?);
        let b2 = cfg.get_f64("B2")?;
        Ok(Self {
            core: ElementCore::new(cfg.name(), length_mm)?,
            b2,
        })
    }
}

impl Element for Quadrupole {
    impl_element_core_methods!();

    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        let real = &state.real_particle;
        let brho = real.beta * (real.e_k + real.e_s) / (config::C0 * real.z);
        let k = self.b2 / brho / config::M_TO_MM.powi(2);

        let mut m: Array2<f64> = quad_matrix(self.core.length_mm, k);
        m[[PS_S, PS_PS]] = ps_s_ps_drift_term(self.core.length_mm, real.e_s, real.bg);

        self.core.transfer_raw = m;
        self.core.last_kenergy_in = real.e_k;
        self.core.last_kenergy_out = real.e_k;
        Ok(())
    }
}
