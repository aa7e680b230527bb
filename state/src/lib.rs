//! Reference/real particle kinematics, the moment-propagation kernel, and
//! the seam (`Element`) concrete element synthesizers implement.

mod element;
mod error;
mod kernel;
mod linalg;
mod moment_state;
mod particle;

pub use element::Element;
pub use error::{MathError, StateError};
pub use kernel::advance;
pub use linalg::invert;
pub use moment_state::{
    ArrayValue, ArrayView, MomentState, PHASE_SPACE_DIM, PS_PS, PS_PX, PS_PY, PS_S, PS_X, PS_Y,
    PS_CHARGE,
};
pub use particle::Particle;
