//! Field-free drift space.

use ndarray::Array2;
use state::{Element, MomentState, PHASE_SPACE_DIM, PS_PS, PS_PX, PS_PY, PS_S, PS_X, PS_Y, StateError};

use crate::config_value::ElementConfig;
use crate::core::{ElementCore, impl_element_core_methods, m_to_mm, ps_s_ps_drift_term};
use crate::error::ConfigError;

pub struct Drift {
    core: ElementCore,
}

impl Drift {
    pub fn from_config(cfg: &ElementConfig) -> Result<Self, ConfigError> {
        let length_mm = m_to_mm(cfg.get_f64("L")?);
        Ok(Self {
            core: ElementCore::new(cfg.name(), length_mm)?,
        })
    }
}

impl Element for Drift {
    impl_element_core_methods!();

    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        let l = self.core.length_mm;
        let mut m = Array2::eye(PHASE_SPACE_DIM);
        m[[PS_X, PS_PX]] = l;
        m[[PS_Y, PS_PY]] = l;
        m[[PS_S, PS_PS]] = ps_s_ps_drift_term(l, state.real_particle.e_s, state.real_particle.bg);

        self.core.transfer_raw = m;
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

    fn one_meter_drift() -> Drift {
        let cfg = ElementConfig::new("d1").with("L", ConfigValue::Float(1.0));
        Drift::from_config(&cfg).unwrap()
    }

    #[test]
    fn scenario_drift_1m_at_1_5_mev() {
        let p = Particle::new(931.5e6, 1.5e6, 1.0, 0.0);
        let mut state = MomentState::new(p, p);
        let mut drift = one_meter_drift();

        advance(&mut state, &mut drift).unwrap();

        let m = &drift.core.transfer;
        assert!((m[[PS_X, PS_PX]] - 1000.0).abs() < 1e-9);
        assert!((m[[PS_Y, PS_PY]] - 1000.0).abs() < 1e-9);

        let expected_bg = (p.w * p.w / (p.e_s * p.e_s) - 1.0).sqrt();
        let expected = -2.0 * std::f64::consts::PI * 1000.0
            / (config::SAMPLE_LAMBDA_MM * 931.5 * expected_bg.powi(3));
        assert!((m[[PS_S, PS_PS]] - expected).abs() / expected.abs() < 1e-9);
    }

    #[test]
    fn length_is_converted_from_meters_to_millimeters() {
        let drift = one_meter_drift();
        assert_eq!(drift.core.length_mm, 1000.0);
    }
}
