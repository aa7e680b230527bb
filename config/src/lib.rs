//! Physical constants and engineering defaults shared across the workspace.
//!
//! Kept dependency-free, the same way the teacher's `config` crate holds nothing but
//! numeric constants: if the naming or value of one of these changes, this is the
//! only file that needs updating.

// ==================== Universal constants

/// Speed of light in vacuum, `C0` \[m/s\].
pub const C0: f64 = 299_792_458.0;

/// Vacuum permeability `μ0` \[T·m/A\].
pub const MU0: f64 = 4.0 * std::f64::consts::PI * 1e-7;

/// Atomic mass unit energy equivalent `AU` \[eV\].
pub const AU: f64 = 931.494_320e6;

/// Nucleon number used throughout the transverse cavity model (`IonA` in the
/// original sources, always 1 for the species this core handles).
pub const ION_A: f64 = 1.0;

// ==================== Unit conversions

/// Meters to millimeters.
pub const M_TO_MM: f64 = 1e3;

/// MeV to eV.
pub const MEV_TO_EV: f64 = 1e6;

// ==================== Longitudinal sampling

/// Longitudinal sampling frequency `f_s` \[Hz\]. Must match the RF cavity's bucket
/// clock; fixed for this core.
pub const SAMPLE_FREQ_HZ: f64 = 80.5e6;

/// Longitudinal sampling wavelength `λ_s = c/f_s·1e3` \[mm\].
pub const SAMPLE_LAMBDA_MM: f64 = C0 / SAMPLE_FREQ_HZ * M_TO_MM;

// ==================== Cavity engineering defaults

/// Default gating level for higher-order thin-lens multipole slices
/// (`EDipole`/`HDipole` at `>= 1`, `EQuad`/`HMono`/`HQuad` at `>= 2`).
pub const DEFAULT_MPOLE_LEVEL: u8 = 2;

/// Metadata for one of the five RF cavity types this core recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CavityTypeInfo {
    /// Cavity index used by the transit-factor tables (`cavi` in the original).
    pub cavi: u8,
    /// Engineering-data label used in file names (`axisData_<label>.txt`, …).
    pub label: &'static str,
    /// Harmonic multiplier of the RF frequency over the sampling frequency.
    pub multip: u8,
    /// Aperture radius `Rm` \[mm\] used by the transverse thin-lens kicks.
    pub rm_mm: f64,
}

/// Looks up the engineering metadata for a `cavtype` configuration string.
pub fn cavity_type_info(cavtype: &str) -> Option<CavityTypeInfo> {
    Some(match cavtype {
        "0.041QWR" => CavityTypeInfo { cavi: 1, label: "41", multip: 1, rm_mm: 17.0 },
        "0.085QWR" => CavityTypeInfo { cavi: 2, label: "85", multip: 1, rm_mm: 17.0 },
        "0.29HWR" => CavityTypeInfo { cavi: 3, label: "29", multip: 4, rm_mm: 20.0 },
        "0.53HWR" => CavityTypeInfo { cavi: 4, label: "53", multip: 4, rm_mm: 20.0 },
        "??EL" => CavityTypeInfo { cavi: 5, label: "53", multip: 8, rm_mm: 20.0 },
        _ => return None,
    })
}

/// The state-kind / element-registry key this core is filed under in the outer
/// simulator's registration mechanism (out of scope here, kept only for
/// documentation and for error messages that must reference the registered name).
pub const STATE_REGISTRY_KEY: &str = "MomentMatrix2";
