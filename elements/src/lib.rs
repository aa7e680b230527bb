//! Lattice element synthesizers: one type per element kind, each producing a
//! 7x7 transfer matrix from its own configuration and the live particle
//! kinematics in `state`.

mod cavity_phase;
mod config_value;
mod core;
mod elements;
mod error;
mod primitives;
mod runtime_config;

pub use cavity_phase::{CavityPhaseSolver, IdentityPhaseSolver};
pub use config_value::{ConfigValue, ElementConfig};
pub use elements::{Drift, EDipole, Generic, Marker, Quadrupole, RfCavity, SBend, Solenoid, Source, Stripper};
pub use error::ConfigError;
pub use runtime_config::RuntimeConfig;

pub mod matrix {
    //! Shared transfer-matrix building blocks, exposed for callers that need
    //! to compose their own element kinds out of the same primitives.
    pub use crate::primitives::{apply_quad_block, edge_matrix, quad_matrix, solenoid_matrix};
}
