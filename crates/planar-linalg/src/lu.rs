//! Full-pivot LU factorization of 3x3 matrices and the inversion built on it.
//!
//! The factorization computes `P * A * Q = L * U` where `P` and `Q` are row and column
//! permutations, `L` is unit lower triangular and `U` upper triangular. The determinant falls out
//! of it as the product of the pivots, signed by the parity of both permutations.

use crate::{constants::INV_EPS, error::LinalgError, types::Mat3};

/// LU factors of a 3x3 matrix with complete pivoting.
#[derive(Debug, Clone)]
pub struct Lu3 {
    /// Row-major packed factors: strict lower part holds `L`, upper part and diagonal hold `U`.
    lu: [[f32; 3]; 3],
    /// `row_perm[i]` is the row of the input that ended up at row `i`.
    row_perm: [usize; 3],
    /// `col_perm[j]` is the column of the input that ended up at column `j`.
    col_perm: [usize; 3],
    /// Number of transpositions applied to rows and columns.
    transpositions: usize,
}

impl Lu3 {
    /// Factorize `m`. Never fails; singular matrices give a zero pivot.
    pub fn new(m: &Mat3) -> Self {
        let mut a = [[0.0f32; 3]; 3];
        for (r, row) in a.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = m.get(r, c);
            }
        }

        let mut row_perm = [0, 1, 2];
        let mut col_perm = [0, 1, 2];
        let mut transpositions = 0;

        for k in 0..3 {
            // pick the largest remaining element as pivot
            let (mut pr, mut pc, mut best) = (k, k, -1.0f32);
            for (i, row) in a.iter().enumerate().skip(k) {
                for (j, v) in row.iter().enumerate().skip(k) {
                    if v.abs() > best {
                        best = v.abs();
                        pr = i;
                        pc = j;
                    }
                }
            }

            if pr != k {
                a.swap(pr, k);
                row_perm.swap(pr, k);
                transpositions += 1;
            }
            if pc != k {
                for row in a.iter_mut() {
                    row.swap(pc, k);
                }
                col_perm.swap(pc, k);
                transpositions += 1;
            }

            let pivot = a[k][k];
            if pivot == 0.0 {
                // the trailing block is all zeros, nothing left to eliminate
                continue;
            }

            for i in (k + 1)..3 {
                let factor = a[i][k] / pivot;
                a[i][k] = factor;
                for j in (k + 1)..3 {
                    a[i][j] -= factor * a[k][j];
                }
            }
        }

        Self {
            lu: a,
            row_perm,
            col_perm,
            transpositions,
        }
    }

    /// Determinant of the factorized matrix.
    pub fn determinant(&self) -> f32 {
        let sign = if self.transpositions % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.lu[0][0] * self.lu[1][1] * self.lu[2][2]
    }

    /// Solve `A * x = b` using the factors.
    pub fn solve(&self, b: &[f32; 3]) -> [f32; 3] {
        let lu = &self.lu;

        // forward substitution with L on the row-permuted rhs
        let mut z = [0.0f32; 3];
        for i in 0..3 {
            let mut acc = b[self.row_perm[i]];
            for j in 0..i {
                acc -= lu[i][j] * z[j];
            }
            z[i] = acc;
        }

        // back substitution with U
        let mut y = [0.0f32; 3];
        for i in (0..3).rev() {
            let mut acc = z[i];
            for j in (i + 1)..3 {
                acc -= lu[i][j] * y[j];
            }
            y[i] = acc / lu[i][i];
        }

        // undo the column permutation
        let mut x = [0.0f32; 3];
        for (j, &yj) in y.iter().enumerate() {
            x[self.col_perm[j]] = yj;
        }
        x
    }

    /// Inverse of the factorized matrix, solving against each unit vector.
    ///
    /// No singularity check is made here, see [`invert_mat3`].
    pub fn inverse(&self) -> Mat3 {
        let mut inv = Mat3::ZERO;
        for (c, col) in inv.0.iter_mut().enumerate() {
            let mut e = [0.0f32; 3];
            e[c] = 1.0;
            *col = self.solve(&e);
        }
        inv
    }
}

/// Invert a 3x3 matrix through its full-pivot LU factorization.
///
/// # Errors
///
/// * [`LinalgError::Singular`] when `|det| < INV_EPS`, with the determinant taken from the factors.
/// * [`LinalgError::NonFiniteResult`] when the determinant check passes but the inverse still
///   holds NaN or infinite values, as happens with NaN input.
///
/// Example:
///
/// ```
/// use planar_linalg::{invert_mat3, Mat3};
///
/// let m = Mat3::from_rows([[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 1.0]]);
/// let inv = invert_mat3(&m).unwrap();
/// assert_eq!(inv.get(0, 0), 0.5);
/// assert_eq!(inv.get(1, 1), 0.25);
/// ```
pub fn invert_mat3(m: &Mat3) -> Result<Mat3, LinalgError> {
    let lu = Lu3::new(m);
    let det = lu.determinant();

    if det.abs() < INV_EPS {
        log::debug!("matrix not invertible: |det| = {} < {INV_EPS}", det.abs());
        return Err(LinalgError::Singular { det });
    }

    let inv = lu.inverse();
    if !inv.is_finite() {
        log::warn!("inverse contains non-finite values (det = {det})");
        return Err(LinalgError::NonFiniteResult);
    }

    Ok(inv)
}

/// Invert `m` into `out`, returning `true` on success.
///
/// On failure `out` is entirely overwritten with NaN.
pub fn invert_mat3_into(m: &Mat3, out: &mut Mat3) -> bool {
    match invert_mat3(m) {
        Ok(inv) => {
            *out = inv;
            true
        }
        Err(_) => {
            *out = Mat3::NAN;
            false
        }
    }
}
