//! Small dense linear-algebra helpers used by misalignment conjugation.

use ndarray::Array2;

use crate::error::MathError;

/// Inverts a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// Returns `MathError::SingularMisalign` if no pivot with a non-negligible
/// magnitude can be found in some column, mirroring the "failed to invert"
/// failure the original reports from its LU factorization.
pub fn invert(m: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    let n = m.nrows();
    assert_eq!(n, m.ncols(), "invert: matrix must be square");

    let mut aug = Array2::<f64>::zeros((n, 2 * n));
    aug.slice_mut(ndarray::s![.., ..n]).assign(m);
    for i in 0..n {
        aug[[i, n + i]] = 1.0;
    }

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| aug[[a, col]].abs().partial_cmp(&aug[[b, col]].abs()).unwrap())
            .unwrap();

        if aug[[pivot_row, col]].abs() < 1e-14 {
            return Err(MathError::SingularMisalign(
                format!("no usable pivot in column {col}").into(),
            ));
        }

        if pivot_row != col {
            let (mut top, mut bottom) = aug.view_mut().split_at(ndarray::Axis(0), pivot_row);
            std::mem::swap(&mut top.row_mut(col), &mut bottom.row_mut(0));
        }

        let pivot = aug[[col, col]];
        {
            let mut row = aug.row_mut(col);
            row /= pivot;
        }

        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = aug[[r, col]];
            if factor == 0.0 {
                continue;
            }
            let pivot_row = aug.row(col).to_owned();
            let mut target = aug.row_mut(r);
            target.scaled_add(-factor, &pivot_row);
        }
    }

    Ok(aug.slice(ndarray::s![.., n..]).to_owned())
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    #[test]
    fn inverts_identity_to_identity() {
        let id: Array2<f64> = Array2::eye(4);
        let inv = invert(&id).unwrap();
        assert!(inv.iter().zip(id.iter()).all(|(a, b)| (a - b).abs() < 1e-12));
    }

    #[test]
    fn inverts_a_simple_rotation() {
        let theta = 0.3_f64;
        let rot = array![[theta.cos(), -theta.sin()], [theta.sin(), theta.cos()]];
        let inv = invert(&rot).unwrap();
        let product = rot.dot(&inv);
        let id: Array2<f64> = Array2::eye(2);
        assert!(product.iter().zip(id.iter()).all(|(a, b)| (a - b).abs() < 1e-10));
    }

    #[test]
    fn rejects_singular_matrix() {
        let singular = array![[1.0, 2.0], [2.0, 4.0]];
        assert!(matches!(invert(&singular), Err(MathError::SingularMisalign(_))));
    }
}
