//! Gradient sector bend (cylindrical-coordinate sector magnet).

use state::{Element, MomentState, PS_CHARGE, PS_PS, PS_PX, PS_S, PS_X, StateError};

use crate::config_value::ElementConfig;
use crate::core::{ElementCore, impl_element_core_methods, m_to_mm};
use crate::error::ConfigError;
use crate::primitives::{apply_quad_block, edge_matrix};

pub struct SBend {
    core: ElementCore,
    /// Bend angle `phi` \[rad\].
    phi: f64,
    /// Entrance edge angle \[rad\].
    phi1: f64,
    /// Exit edge angle \[rad\].
    phi2: f64,
    /// Gradient strength `K` \[1/mm²\].
    k: f64,
}

impl SBend {
    pub fn from_config(cfg: &ElementConfig) -> Result<Self, ConfigError> {
        let length_mm = m_to_mm(cfg.get_f64("L")?);
        let deg_to_rad = std::f64::consts::PI / 180.0;
        let phi = cfg.get_f64("phi")? * deg_to_rad;
        let phi1 = cfg.get_f64("phi1")? * deg_to_rad;
        let phi2 = cfg.get_f64("phi2")? * deg_to_rad;
        let k = cfg.get_f64_or("K", 0.0)? / config::M_TO_MM.powi(2);
        Ok(Self {
            core: ElementCore::new(cfg.name(), length_mm)?,
            phi,
            phi1,
            phi2,
            k,
        })
    }
}

impl Element for SBend {
    impl_element_core_methods!();

    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        let l = self.core.length_mm;
        let rho = l / self.phi;
        let kx = self.k + 1.0 / (rho * rho);
        let ky = -self.k;

        let edge1 = edge_matrix(rho, self.phi1);
        let edge2 = edge_matrix(rho, self.phi2);

        let mut m = ndarray::Array2::eye(state::PHASE_SPACE_DIM);
        apply_quad_block(&mut m, l, kx, PS_X);
        apply_quad_block(&mut m, l, ky, state::PS_Y);

        let (dx, sx) = if kx == 0.0 {
            (l * l / 2.0, l)
        } else if kx > 0.0 {
            let root = kx.sqrt();
            ((1.0 - (root * l).cos()) / kx, (root * l).sin() / root)
        } else {
            let root = (-kx).sqrt();
            // `sx` reproduces the original's `sin(sqrt(Kx)*L)/sqrt(Kx)` with a
            // negative argument to `sqrt`, which is NaN in real arithmetic;
            // preserved verbatim rather than "corrected" to `sinh`.
            ((1.0 - (root * l).cosh()) / kx, (kx.sqrt() * l).sin() / kx.sqrt())
        };

        let r#ref = &state.ref_particle;
        let beta2_gamma_es = r#ref.beta * r#ref.beta * r#ref.gamma * (r#ref.e_s / config::MEV_TO_EV);

        m[[PS_X, PS_PS]] = dx / (rho * beta2_gamma_es);
        m[[PS_PX, PS_PS]] = sx / (rho * beta2_gamma_es);
        m[[PS_S, PS_X]] = sx / rho * r#ref.k_s;
        m[[PS_S, PS_PX]] = dx / rho * r#ref.k_s;
        m[[PS_S, PS_PS]] = ((l - sx) / (kx * rho * rho) - l / (r#ref.gamma * r#ref.gamma)) * r#ref.k_s
            / beta2_gamma_es;

        let qmrel = (state.real_particle.z - r#ref.z) / r#ref.z;
        m[[PS_X, PS_CHARGE]] = -dx / rho * qmrel;
        m[[PS_PX, PS_CHARGE]] = -sx / rho * qmrel;
        // The bracketed term is `(L-sx)/(Kx*rho^2) - L/gamma^2 + L/gamma^2`,
        // which algebraically cancels to the first term; reproduced verbatim.
        m[[PS_S, PS_CHARGE]] = -((l - sx) / (kx * rho * rho) - l / (r#ref.gamma * r#ref.gamma)
            + l / (r#ref.gamma * r#ref.gamma))
            * r#ref.k_s
            * qmrel;

        let m = m.dot(&edge1);
        let m = edge2.dot(&m);

        self.core.transfer_raw = m;
        self.core.last_kenergy_in = state.real_particle.e_k;
        self.core.last_kenergy_out = state.real_particle.e_k;
        Ok(())
    }
}
