//! The seam between the generic propagation kernel and concrete element
//! matrix synthesizers, kept here (not in a higher-level crate) so the
//! kernel can stay generic over `dyn Element` without depending on any
//! concrete element implementation.

use ndarray::Array2;

use crate::error::StateError;
use crate::moment_state::MomentState;

/// One beamline element, as seen by the propagation kernel.
///
/// Implementors own their configuration and the mutable caches
/// (`last_kenergy_in`/`last_kenergy_out`) the kernel uses to decide whether
/// `recompute_matrix` needs to run again.
pub trait Element {
    /// Name used in error messages and the element registry.
    fn name(&self) -> &str;

    /// Element length \[mm\].
    fn length_mm(&self) -> f64;

    /// Whether this element is an RF cavity; cavities get special phase and
    /// longitudinal-moment handling in the kernel.
    fn is_rfcavity(&self) -> bool {
        false
    }

    /// The kinetic energy \[eV\] this element's cached `transfer` was last
    /// synthesized for. `NaN` forces recomputation on the first advance.
    fn last_kenergy_in(&self) -> f64;

    /// The real particle's kinetic energy \[eV\] immediately after this
    /// element last ran (identity for everything but rfcavity).
    fn last_kenergy_out(&self) -> f64;

    /// Fixed misalignment transform (identity unless configured).
    fn misalign(&self) -> &Array2<f64>;

    /// Precomputed inverse of `misalign`.
    fn misalign_inv(&self) -> &Array2<f64>;

    /// The element's conjugated transfer matrix, as last set by
    /// `set_transfer`. Used directly by the kernel to propagate moment0 and
    /// sigma; undefined before the first `recompute_matrix` call.
    fn transfer(&self) -> &Array2<f64>;

    /// Installs the conjugated transfer matrix computed by the kernel.
    fn set_transfer(&mut self, transfer: Array2<f64>);

    /// Synthesizes `transfer_raw` from the element's configuration and the
    /// state's live `real` particle, and updates `last_kenergy_{in,out}`.
    ///
    /// For `rfcavity` elements this also advances `state.real` and
    /// `state.ref` kinematics/phase (the longitudinal boost); for every
    /// other kind the kernel performs phase bookkeeping itself after this
    /// call returns.
    fn recompute_matrix(&mut self, state: &mut MomentState) -> Result<(), StateError>;
}
