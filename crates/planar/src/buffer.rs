//! These are the entry points for callers that hold raw storage, e.g. across an FFI boundary or
//! inside a larger tensor. Matrices are read column-major, see [`planar_linalg::types`]. Every
//! function validates all buffer lengths before it reads or writes anything, so a
//! [`BufferError`] always leaves the outputs untouched.
//!
//! Numerical failures are not errors here: [`invert_matrix`] and [`solve_homography_svd`] return
//! `Ok(false)` and fill their output with NaN, and [`transform_points_batch`] marks individual
//! degenerate points with NaN.

use planar_linalg::{
    det_mat3, invert_mat3_into, mul_mat3, solve_homography_into, LinalgError, Mat3, Mat8, Vec8,
};
use planar_warp::{points_from_flat, points_from_flat_mut, WarpError};

/// An error type for the flat buffer operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BufferError {
    /// A buffer does not hold the number of elements the operation needs.
    #[error("Buffer `{name}` has length {actual}, expected {expected}")]
    Length {
        /// Name of the offending argument.
        name: &'static str,
        /// Expected number of elements.
        expected: usize,
        /// Actual number of elements.
        actual: usize,
    },

    /// A linear algebra routine rejected a buffer for a reason other than its length.
    #[error(transparent)]
    Linalg(#[from] LinalgError),

    /// Point buffers are malformed or do not match.
    #[error(transparent)]
    Warp(#[from] WarpError),
}

/// Map the length error of a view into one that names the offending argument.
fn length_error(name: &'static str) -> impl FnOnce(LinalgError) -> BufferError {
    move |e| match e {
        LinalgError::InvalidLength { expected, actual } => {
            log::debug!("rejecting buffer `{name}`: {actual} != {expected}");
            BufferError::Length {
                name,
                expected,
                actual,
            }
        }
        e => BufferError::Linalg(e),
    }
}

fn mat3<'a>(name: &'static str, data: &'a [f32]) -> Result<&'a Mat3, BufferError> {
    Mat3::view(data).map_err(length_error(name))
}

fn mat3_mut<'a>(name: &'static str, data: &'a mut [f32]) -> Result<&'a mut Mat3, BufferError> {
    Mat3::view_mut(data).map_err(length_error(name))
}

/// Multiply two 3x3 matrices, `out = a * b`.
///
/// `out` must not alias `a` or `b`, which the borrow rules already enforce.
///
/// # Errors
///
/// Returns [`BufferError::Length`] if any buffer does not hold 9 elements.
pub fn multiply_matrices(a: &[f32], b: &[f32], out: &mut [f32]) -> Result<(), BufferError> {
    let a = mat3("a", a)?;
    let b = mat3("b", b)?;
    let out = mat3_mut("out", out)?;
    *out = mul_mat3(a, b);
    Ok(())
}

/// Determinant of a 3x3 matrix.
///
/// # Errors
///
/// Returns [`BufferError::Length`] if `m` does not hold 9 elements.
pub fn determinant(m: &[f32]) -> Result<f32, BufferError> {
    Ok(det_mat3(mat3("m", m)?))
}

/// Invert a 3x3 matrix into `out`.
///
/// Returns `Ok(true)` on success, `Ok(false)` with `out` filled with NaN when the matrix is
/// singular or the inverse is not finite.
///
/// # Errors
///
/// Returns [`BufferError::Length`] if either buffer does not hold 9 elements.
///
/// Example:
///
/// ```
/// use planar::buffer::invert_matrix;
///
/// let m = [2.0, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 1.0];
/// let mut inv = [0.0; 9];
/// assert!(invert_matrix(&m, &mut inv).unwrap());
/// assert_eq!(inv, [0.5, 0.0, 0.0, 0.0, 0.25, 0.0, 0.0, 0.0, 1.0]);
///
/// let mut inv = [0.0; 9];
/// assert!(!invert_matrix(&[0.0; 9], &mut inv).unwrap());
/// assert!(inv.iter().all(|v| v.is_nan()));
/// ```
pub fn invert_matrix(m: &[f32], out: &mut [f32]) -> Result<bool, BufferError> {
    let m = mat3("m", m)?;
    let out = mat3_mut("out", out)?;
    Ok(invert_mat3_into(m, out))
}

/// Solve the 8x8 homography system `A * h = b` into `out`.
///
/// `a` is the column-major 8x8 matrix, `b` and `out` hold 8 elements. Returns `Ok(true)` on
/// success, `Ok(false)` with `out` filled with NaN when the system is rank deficient, the
/// decomposition fails or the solution is not finite.
///
/// # Errors
///
/// Returns [`BufferError::Length`] if `a` does not hold 64 elements or `b`/`out` do not hold 8.
pub fn solve_homography_svd(a: &[f32], b: &[f32], out: &mut [f32]) -> Result<bool, BufferError> {
    let a = Mat8::view(a).map_err(length_error("a"))?;
    let b = Vec8::view(b).map_err(length_error("b"))?;
    let out = Vec8::view_mut(out).map_err(length_error("out"))?;

    Ok(solve_homography_into(a, b, out))
}

/// Project interleaved `x y` points of `src` through the 3x3 matrix `m` into `dst`.
///
/// Points whose homogeneous coordinate is within `SVD_EPS` of zero are written as NaN pairs; the
/// rest of the batch is unaffected.
///
/// # Errors
///
/// * [`BufferError::Length`] if `m` does not hold 9 elements.
/// * [`BufferError::Warp`] if `src` or `dst` has an odd length or they differ in length.
pub fn transform_points_batch(m: &[f32], src: &[f32], dst: &mut [f32]) -> Result<(), BufferError> {
    let m = mat3("m", m)?;
    let src = points_from_flat(src)?;
    let dst = points_from_flat_mut(dst)?;
    planar_warp::transform_points(m, src, dst)?;
    Ok(())
}
