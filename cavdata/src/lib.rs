//! Loaders for the RF cavity engineering-data files: tabulated on-axis
//! fields, thin-lens multipole line tables and transit-factor curves.
//!
//! Kept separate from `elements` so the file formats and their failure modes
//! can be tested without constructing a full cavity element.

mod axis_field;
mod error;
mod thin_lens;
mod transit_factors;

pub use axis_field::AxisField;
pub use error::CavDataError;
pub use thin_lens::{SliceKind, ThinLensSlice, ThinLensTable};
pub use transit_factors::{MultipoleCurve, TransitFactors};

pub type Result<T> = std::result::Result<T, CavDataError>;
