//! Matrix primitives shared by several element synthesizers: edge kicks,
//! quadrupole focusing/defocusing blocks, and the solenoid rotating-frame
//! block.

use ndarray::Array2;
use state::{PHASE_SPACE_DIM, PS_PX, PS_PY, PS_X, PS_Y};

/// A fringe-field edge kick at bend angle `phi` \[rad\] and bend radius `rho`
/// \[mm\]. Identity apart from the X/Y momentum kicks.
pub fn edge_matrix(rho: f64, phi: f64) -> Array2<f64> {
    let mut m = Array2::eye(PHASE_SPACE_DIM);
    m[[PS_PX, PS_X]] = phi.tan() / rho;
    m[[PS_PY, PS_Y]] = -phi.tan() / rho;
    m
}

/// Patches the 2x2 block starting at `(ind, ind)` of `m` with the
/// focusing/defocusing quadrupole solution for strength `k` \[1/mm²\] over
/// length `l` \[mm\]. `k > 0` focuses, `k < 0` defocuses, `k == 0` drifts.
pub fn apply_quad_block(m: &mut Array2<f64>, l: f64, k: f64, ind: usize) {
    let (diag, off_plus, off_minus) = if k > 0.0 {
        let kappa = k.sqrt();
        let cs = (kappa * l).cos();
        let sn = (kappa * l).sin();
        let off_plus = if kappa == 0.0 { l } else { sn / kappa };
        (cs, off_plus, -kappa * sn)
    } else if k < 0.0 {
        let kappa = (-k).sqrt();
        let cs = (kappa * l).cosh();
        let sn = (kappa * l).sinh();
        let off_plus = if kappa == 0.0 { l } else { sn / kappa };
        (cs, off_plus, kappa * sn)
    } else {
        (1.0, l, 0.0)
    };

    m[[ind, ind]] = diag;
    m[[ind, ind + 1]] = off_plus;
    m[[ind + 1, ind]] = off_minus;
    m[[ind + 1, ind + 1]] = diag;
}

/// Patches an identity matrix with the focusing quadrupole block on `(X,
/// PX)` at strength `+k` and the defocusing block on `(Y, PY)` at `-k`.
pub fn quad_matrix(l: f64, k: f64) -> Array2<f64> {
    let mut m = Array2::eye(PHASE_SPACE_DIM);
    apply_quad_block(&mut m, l, k, PS_X);
    apply_quad_block(&mut m, l, -k, PS_Y);
    m
}

/// The standard rotating-frame solenoid block on `(X, PX, Y, PY)` for
/// strength `k` \[1/mm\] over length `l` \[mm\]. Reduces to a pure drift in
/// both transverse planes when `k == 0`.
pub fn solenoid_matrix(l: f64, k: f64) -> Array2<f64> {
    let mut m = Array2::eye(PHASE_SPACE_DIM);

    if k == 0.0 {
        m[[PS_X, PS_PX]] = l;
        m[[PS_Y, PS_PY]] = l;
        return m;
    }

    let c = (k * l).cos();
    let s = (k * l).sin();

    m[[PS_X, PS_X]] = c * c;
    m[[PS_X, PS_PX]] = c * s / k;
    m[[PS_X, PS_Y]] = s * c;
    m[[PS_X, PS_PY]] = s * s / k;

    m[[PS_PX, PS_X]] = -k * s * c;
    m[[PS_PX, PS_PX]] = c * c;
    m[[PS_PX, PS_Y]] = -k * s * s;
    m[[PS_PX, PS_PY]] = s * c;

    m[[PS_Y, PS_X]] = -s * c;
    m[[PS_Y, PS_PX]] = -s * s / k;
    m[[PS_Y, PS_Y]] = c * c;
    m[[PS_Y, PS_PY]] = s * c / k;

    m[[PS_PY, PS_X]] = k * s * s;
    m[[PS_PY, PS_PX]] = -s * c;
    m[[PS_PY, PS_Y]] = -k * s * c;
    m[[PS_PY, PS_PY]] = c * c;

    m
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn edge_matrix_is_identity_at_zero_angle() {
        let m = edge_matrix(1000.0, 0.0);
        assert_eq!(m, Array2::eye(PHASE_SPACE_DIM));
    }

    #[test]
    fn quad_matrix_reduces_to_drift_at_zero_strength() {
        let m = quad_matrix(500.0, 0.0);
        assert_eq!(m[[PS_X, PS_PX]], 500.0);
        assert_eq!(m[[PS_Y, PS_PY]], 500.0);
    }

    #[test]
    fn quad_matrix_focuses_x_and_defocuses_y() {
        let l = 200.0;
        let k = 1e-5;
        let m = quad_matrix(l, k);
        let kappa = k.sqrt();
        assert!((m[[PS_X, PS_X]] - (kappa * l).cos()).abs() < 1e-12);
        assert!((m[[PS_Y, PS_Y]] - (kappa * l).cosh()).abs() < 1e-12);
    }

    #[test]
    fn solenoid_matrix_reduces_to_drift_at_zero_strength() {
        let m = solenoid_matrix(500.0, 0.0);
        assert_eq!(m[[PS_X, PS_PX]], 500.0);
        assert_eq!(m[[PS_Y, PS_PY]], 500.0);
    }
}
