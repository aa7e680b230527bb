//! One module per lattice element kind this core synthesizes a transfer
//! matrix for.

mod drift;
mod edipole;
mod generic;
mod marker;
mod quadrupole;
mod rfcavity;
mod sbend;
mod solenoid;
mod source;
mod stripper;

pub use drift::Drift;
pub use edipole::EDipole;
pub use generic::Generic;
pub use marker::Marker;
pub use quadrupole::Quadrupole;
pub use rfcavity::RfCavity;
pub use sbend::SBend;
pub use solenoid::Solenoid;
pub use source::Source;
pub use stripper::Stripper;
