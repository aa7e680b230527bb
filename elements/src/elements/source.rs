//! The beam source: on every advance, replaces the propagated state with a
//! stored initial moment/sigma rather than applying a transfer matrix.

use ndarray::{Array1, Array2};
use state::{Element, MomentState, PHASE_SPACE_DIM, Particle, StateError};

use crate::config_value::ElementConfig;
use crate::core::{ElementCore, m_to_mm};
use crate::error::ConfigError;

pub struct Source {
    core: ElementCore,
    istate: MomentState,
}

impl Source {
    pub fn from_config(cfg: &ElementConfig) -> Result<Self, ConfigError> {
        let length_mm = cfg.try_get_f64("L")?.map(m_to_mm).unwrap_or(0.0);
        Ok(Self {
            core: ElementCore::new(cfg.name(), length_mm)?,
            istate: build_initial_state(cfg)?,
        })
    }
}

/// Parses the multi-charge-state-aware initial state: `cstate`/
/// `IonChargeStates` select which charge state this source represents;
/// `vector_variable`/`matrix_variable` (optionally suffixed by the charge
/// state index) name the moment0/sigma to load. Absent suffixed names are
/// an error once a charge state is selected; otherwise missing falls back
/// to zeros/identity.
fn build_initial_state(cfg: &ElementConfig) -> Result<MomentState, ConfigError> {
    let ion_es = cfg.get_f64("IonEs")?;
    let ion_ek = cfg.get_f64("IonEk")?;

    let cstate = cfg.try_get_f64("cstate")?.map(|v| v.round() as usize);

    let z = match cstate {
        Some(idx) => {
            let charge_states = cfg.get_vec_f64("IonChargeStates")?;
            *charge_states
                .get(idx)
                .ok_or_else(|| ConfigError::IndexOutOfRange {
                    element: cfg.name().into(),
                    key: "IonChargeStates".into(),
                    index: idx,
                    len: charge_states.len(),
                })?
        }
        None => cfg.get_f64("IonZ")?,
    };

    let vector_name = named_key(cfg.try_get_string("vector_variable")?.unwrap_or("moment0"), cstate);
    let matrix_name = named_key(cfg.try_get_string("matrix_variable")?.unwrap_or("initial"), cstate);

    let moment0 = match cfg.try_get_vec_f64(&vector_name)? {
        Some(v) => {
            if v.len() != PHASE_SPACE_DIM {
                return Err(ConfigError::SizeMismatch {
                    element: cfg.name().into(),
                    key: vector_name.clone().into(),
                    got: v.len(),
                    expected: PHASE_SPACE_DIM,
                });
            }
            Array1::from_vec(v.to_vec())
        }
        None if cstate.is_some() => {
            return Err(ConfigError::MissingKey {
                element: cfg.name().into(),
                key: vector_name.clone().into(),
            });
        }
        None => {
            let mut v = Array1::zeros(PHASE_SPACE_DIM);
            v[PHASE_SPACE_DIM - 1] = 1.0;
            v
        }
    };

    let sigma = match cfg.try_get_vec_f64(&matrix_name)? {
        Some(v) => {
            if v.len() != PHASE_SPACE_DIM * PHASE_SPACE_DIM {
                return Err(ConfigError::SizeMismatch {
                    element: cfg.name().into(),
                    key: matrix_name.clone().into(),
                    got: v.len(),
                    expected: PHASE_SPACE_DIM * PHASE_SPACE_DIM,
                });
            }
            Array2::from_shape_vec((PHASE_SPACE_DIM, PHASE_SPACE_DIM), v.to_vec()).expect("checked above")
        }
        None if cstate.is_some() => {
            return Err(ConfigError::MissingKey {
                element: cfg.name().into(),
                key: matrix_name.clone().into(),
            });
        }
        None => Array2::eye(PHASE_SPACE_DIM),
    };

    let ref_particle = Particle::new(ion_es, ion_ek, z, 0.0);
    let real_particle = ref_particle;

    MomentState::with_moments(ref_particle, real_particle, moment0, sigma).map_err(ConfigError::from)
}

fn named_key(base: &str, cstate: Option<usize>) -> String {
    match cstate {
        Some(idx) => format!("{base}{idx}"),
        None => base.to_string(),
    }
}

impl Element for Source {
    fn name(&self) -> &str {
        &self.core.name
    }
    fn length_mm(&self) -> f64 {
        self.core.length_mm
    }
    fn last_kenergy_in(&self) -> f64 {
        // Always mismatches so the kernel re-emits the initial state on
        // every single advance, not just the first.
        f64::NAN
    }
    fn last_kenergy_out(&self) -> f64 {
        self.core.last_kenergy_out
    }
    fn misalign(&self) -> &Array2<f64> {
        &self.core.misalign
    }
    fn misalign_inv(&self) -> &Array2<f64> {
        &self.core.misalign_inv
    }
    fn transfer(&self) -> &Array2<f64> {
        &self.core.transfer
    }
    fn set_transfer(&mut self, transfer: Array2<f64>) {
        self.core.transfer = transfer;
    }

    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError> {
        *state = self.istate.clone();
        self.core.transfer_raw = Array2::eye(PHASE_SPACE_DIM);
        self.core.last_kenergy_out = state.real_particle.e_k;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config_value::ConfigValue;
    use state::advance;

    fn base_config() -> ElementConfig {
        ElementConfig::new("src")
            .with("IonEs", ConfigValue::Float(931.5e6))
            .with("IonEk", ConfigValue::Float(1.5e6))
            .with("IonZ", ConfigValue::Float(1.0))
    }

    #[test]
    fn defaults_to_unit_charge_moment_and_identity_sigma() {
        let cfg = base_config();
        let mut source = Source::from_config(&cfg).unwrap();
        let p = Particle::new(0.0, 0.0, 0.0, 0.0);
        let mut state = MomentState::new(p, p);

        advance(&mut state, &mut source).unwrap();

        assert_eq!(state.moment0[PHASE_SPACE_DIM - 1], 1.0);
        assert_eq!(state.sigma, Array2::eye(PHASE_SPACE_DIM));
        assert_eq!(state.ref_particle.e_k, 1.5e6);
    }

    #[test]
    fn every_advance_reemits_the_initial_state() {
        let cfg = base_config();
        let mut source = Source::from_config(&cfg).unwrap();
        let p = Particle::new(0.0, 0.0, 0.0, 0.0);
        let mut state = MomentState::new(p, p);

        advance(&mut state, &mut source).unwrap();
        state.moment0[0] = 99.0;
        advance(&mut state, &mut source).unwrap();

        assert_eq!(state.moment0[0], 0.0);
    }

    #[test]
    fn multi_charge_state_selects_the_indexed_charge_and_suffixed_vectors() {
        let cfg = base_config()
            .with("cstate", ConfigValue::Float(1.0))
            .with("IonChargeStates", ConfigValue::FloatVec(vec![0.14, 0.16]))
            .with(
                "moment01",
                ConfigValue::FloatVec(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
            )
            .with(
                "initial1",
                ConfigValue::FloatVec(vec![0.0; PHASE_SPACE_DIM * PHASE_SPACE_DIM]),
            );
        let source = Source::from_config(&cfg).unwrap();
        assert_eq!(source.istate.ref_particle.z, 0.16);
        assert_eq!(source.istate.moment0[0], 1.0);
    }

    #[test]
    fn multi_charge_state_without_suffixed_vector_errors() {
        let cfg = base_config()
            .with("cstate", ConfigValue::Float(0.0))
            .with("IonChargeStates", ConfigValue::FloatVec(vec![0.14, 0.16]));
        assert!(matches!(
            Source::from_config(&cfg),
            Err(ConfigError::MissingKey { .. })
        ));
    }
}
