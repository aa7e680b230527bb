//! Beam-dynamics transfer-matrix core: re-exports the workspace's member
//! crates under one top-level surface.

pub use cavdata::{AxisField, CavDataError, MultipoleCurve, SliceKind, ThinLensSlice, ThinLensTable, TransitFactors};

pub use config::{cavity_type_info, CavityTypeInfo};

pub use elements::{
    CavityPhaseSolver, ConfigError, ConfigValue, Drift, EDipole, ElementConfig, Generic,
    IdentityPhaseSolver, Marker, Quadrupole, RfCavity, RuntimeConfig, SBend, Solenoid, Source,
    Stripper,
};

pub use state::{
    advance, invert, ArrayValue, ArrayView, Element, MathError, MomentState, Particle, StateError,
    PHASE_SPACE_DIM, PS_CHARGE, PS_PS, PS_PX, PS_PY, PS_S, PS_X, PS_Y,
};
