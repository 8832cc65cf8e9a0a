//! Homography estimation from four point correspondences.
//!
//! With `h33 = 1` fixed, four correspondences give a square 8x8 system `A * h = b`. It is solved
//! through [`Svd8`] and rejected unless every singular value is at least `SVD_EPS` times the
//! largest one.

use crate::{
    constants::SVD_EPS,
    error::LinalgError,
    svd::Svd8,
    types::{Mat8, Vec8},
};

/// Build the 8x8 linear system `A * h = b` for a homography from four 2d point correspondences.
///
/// The homography is normalized with `h33 = 1`, so every correspondence `(x, y) -> (u, v)`
/// contributes the two rows
///
/// ```text
/// [x  y  1  0  0  0  -u*x  -u*y] * h = u
/// [0  0  0  x  y  1  -v*x  -v*y] * h = v
/// ```
///
/// * `src` - The source 2d points with shape (4, 2).
/// * `dst` - The destination 2d points with shape (4, 2).
///
/// # Returns
///
/// The matrix `A` and the right-hand side `b`, ready for [`solve_homography`].
pub fn homography_system(src: &[[f32; 2]; 4], dst: &[[f32; 2]; 4]) -> (Mat8, Vec8) {
    let mut a = Mat8::ZERO;
    let mut b = Vec8::ZERO;
    for (i, (&[x, y], &[u, v])) in src.iter().zip(dst.iter()).enumerate() {
        let (r0, r1) = (2 * i, 2 * i + 1);

        a[(r0, 0)] = x;
        a[(r0, 1)] = y;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -u * x;
        a[(r0, 7)] = -u * y;
        b[r0] = u;

        a[(r1, 3)] = x;
        a[(r1, 4)] = y;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -v * x;
        a[(r1, 7)] = -v * y;
        b[r1] = v;
    }
    (a, b)
}

/// Solve the 8 homography parameters from `A * x = b` in the least squares sense.
///
/// The system is decomposed with [`Svd8`] and rejected when any singular value is below
/// `SVD_EPS * max(singular values)`. The solution from the pseudo-inverse is checked once more
/// for non-finite values, since the threshold alone does not guarantee a clean solve.
///
/// # Errors
///
/// * [`LinalgError::InvalidInput`] or [`LinalgError::SvdNotConverged`] from the decomposition.
/// * [`LinalgError::RankDeficient`] when the system is ill-conditioned or all zeros.
/// * [`LinalgError::NonFiniteResult`] when the solved vector holds NaN or infinite values.
///
/// Example:
///
/// ```
/// use planar_linalg::{homography_system, solve_homography};
///
/// let src = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// let dst = [[1.0, 2.0], [2.0, 2.0], [2.0, 3.0], [1.0, 3.0]];
/// let (a, b) = homography_system(&src, &dst);
/// let h = solve_homography(&a, &b).unwrap().to_homography();
/// assert!((h.get(0, 2) - 1.0).abs() < 1e-4);
/// assert!((h.get(1, 2) - 2.0).abs() < 1e-4);
/// ```
pub fn solve_homography(a: &Mat8, b: &Vec8) -> Result<Vec8, LinalgError> {
    let svd = Svd8::new(a).inspect_err(|e| log::debug!("homography svd failed: {e}"))?;

    let s = svd.singular_values();
    let (max, min) = (s[0], s[7]);
    let threshold = SVD_EPS * max;
    if max == 0.0 || min.abs() < threshold {
        log::debug!("homography system is rank deficient: {min} < {threshold}");
        return Err(LinalgError::RankDeficient { min, threshold });
    }

    let x = svd.solve(b);
    if !x.is_finite() {
        log::debug!("homography solution is not finite: {x:?}");
        return Err(LinalgError::NonFiniteResult);
    }

    Ok(x)
}

/// Solve the homography into `out`, returning `true` on success.
///
/// On failure `out` is entirely overwritten with NaN.
pub fn solve_homography_into(a: &Mat8, b: &Vec8, out: &mut Vec8) -> bool {
    match solve_homography(a, b) {
        Ok(x) => {
            *out = x;
            true
        }
        Err(_) => {
            *out = Vec8::NAN;
            false
        }
    }
}
