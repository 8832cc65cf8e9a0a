#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Points are `[x, y]` pairs. A batch is a slice of pairs, or a flat `f32` slice interleaved as
//! `x0 y0 x1 y1 ...` through the `*_flat` helpers. Points whose homogeneous coordinate falls
//! below [`planar_linalg::SVD_EPS`] in magnitude come out as `[NaN, NaN]`.

/// Error types for the projection routines.
pub mod error;

mod scalar;

/// Vectorized projection with `wide::f32x4`.
#[cfg(feature = "simd")]
pub mod simd;

use planar_linalg::Mat3;

pub use error::WarpError;
pub use scalar::{is_valid_point, project_point, transform_points_scalar};
#[cfg(feature = "simd")]
pub use simd::{transform_points_simd, LANES};

/// Project every point of `src` through `m` into `dst`.
///
/// Runs the lane path when the `simd` feature is on and the scalar path otherwise; both give
/// bit-identical output. Degenerate points are written as `[NaN, NaN]` and never abort the batch.
///
/// # Arguments
///
/// * `m` - The 3x3 projective transform.
/// * `src` - The input points.
/// * `dst` - The output points, same length as `src`.
///
/// # Errors
///
/// Returns [`WarpError::LengthMismatch`] if the slices differ in length. Nothing is written then.
///
/// Example:
///
/// ```
/// use planar_linalg::Mat3;
/// use planar_warp::transform_points;
///
/// let m = Mat3::from_rows([[1.0, 0.0, 2.0], [0.0, 1.0, -1.0], [0.0, 0.0, 1.0]]);
/// let src = [[0.0, 0.0], [1.0, 1.0], [2.0, 3.0]];
/// let mut dst = [[0.0; 2]; 3];
/// transform_points(&m, &src, &mut dst).unwrap();
/// assert_eq!(dst, [[2.0, -1.0], [3.0, 0.0], [4.0, 2.0]]);
/// ```
pub fn transform_points(
    m: &Mat3,
    src: &[[f32; 2]],
    dst: &mut [[f32; 2]],
) -> Result<(), WarpError> {
    #[cfg(feature = "simd")]
    {
        simd::transform_points_simd(m, src, dst)
    }
    #[cfg(not(feature = "simd"))]
    {
        scalar::transform_points_scalar(m, src, dst)
    }
}

/// Reinterpret a flat interleaved buffer as a slice of points without copying.
///
/// # Errors
///
/// Returns [`WarpError::InvalidLength`] if `data.len()` is odd.
pub fn points_from_flat(data: &[f32]) -> Result<&[[f32; 2]], WarpError> {
    if data.len() % 2 != 0 {
        return Err(WarpError::InvalidLength(data.len()));
    }
    // SAFETY: `[f32; 2]` has the size and alignment of two consecutive `f32`, and the length was
    // checked to hold whole pairs.
    Ok(unsafe { std::slice::from_raw_parts(data.as_ptr() as *const [f32; 2], data.len() / 2) })
}

/// Mutable counterpart of [`points_from_flat`].
///
/// # Errors
///
/// Returns [`WarpError::InvalidLength`] if `data.len()` is odd.
pub fn points_from_flat_mut(data: &mut [f32]) -> Result<&mut [[f32; 2]], WarpError> {
    if data.len() % 2 != 0 {
        return Err(WarpError::InvalidLength(data.len()));
    }
    // SAFETY: same layout argument as `points_from_flat`; the borrow is unique.
    Ok(unsafe {
        std::slice::from_raw_parts_mut(data.as_mut_ptr() as *mut [f32; 2], data.len() / 2)
    })
}

/// [`transform_points`] over flat interleaved buffers.
///
/// # Errors
///
/// * [`WarpError::InvalidLength`] if either buffer has an odd length.
/// * [`WarpError::LengthMismatch`] if they hold a different number of points.
pub fn transform_points_flat(m: &Mat3, src: &[f32], dst: &mut [f32]) -> Result<(), WarpError> {
    let src = points_from_flat(src)?;
    let dst = points_from_flat_mut(dst)?;
    transform_points(m, src, dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_points_identity() -> Result<(), WarpError> {
        for n in [0, 1, 3, 4, 5, 100] {
            let src: Vec<[f32; 2]> = (0..n)
                .map(|i| [i as f32 * 0.5 - 7.0, 3.0 - i as f32])
                .collect();
            let mut dst = vec![[f32::NAN; 2]; n];
            transform_points(&Mat3::IDENTITY, &src, &mut dst)?;
            assert_eq!(src, dst);
        }
        Ok(())
    }

    #[test]
    fn transform_points_zero_w() -> Result<(), WarpError> {
        // W = x - 1
        let m = Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, -1.0]]);
        let src = [[0.0, 0.0], [1.0, 5.0], [2.0, 3.0], [3.0, 1.0], [-1.0, 4.0], [1.0, -2.0]];
        let mut dst = [[0.0; 2]; 6];
        transform_points(&m, &src, &mut dst)?;

        assert!(!is_valid_point(&dst[1]));
        assert!(!is_valid_point(&dst[5]));
        assert_eq!(dst[0], [-0.0, -0.0]);
        assert_eq!(dst[2], [2.0, 3.0]);
        assert_eq!(dst[3], [1.5, 0.5]);
        assert_eq!(dst[4], [0.5, -2.0]);
        Ok(())
    }

    #[test]
    fn transform_points_length_mismatch() {
        let src = [[1.0, 1.0]; 6];
        let mut dst = [[0.0, 0.0]; 5];
        assert_eq!(
            transform_points(&Mat3::IDENTITY, &src, &mut dst),
            Err(WarpError::LengthMismatch(6, 5))
        );
        assert_eq!(dst, [[0.0, 0.0]; 5]);
    }

    #[test]
    fn flat_buffers() -> Result<(), WarpError> {
        let m = Mat3::from_rows([[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 1.0]]);
        let src = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut dst = [0.0; 6];
        transform_points_flat(&m, &src, &mut dst)?;
        assert_eq!(dst, [2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
        assert_eq!(points_from_flat(&src)?[1], [3.0, 4.0]);
        Ok(())
    }

    #[test]
    fn flat_odd_length() {
        let mut dst = [0.0; 4];
        assert_eq!(
            transform_points_flat(&Mat3::IDENTITY, &[0.0; 5], &mut dst),
            Err(WarpError::InvalidLength(5))
        );
        assert_eq!(
            transform_points_flat(&Mat3::IDENTITY, &[0.0; 4], &mut [0.0; 3]),
            Err(WarpError::InvalidLength(3))
        );
        assert_eq!(
            transform_points_flat(&Mat3::IDENTITY, &[0.0; 4], &mut [0.0; 6]),
            Err(WarpError::LengthMismatch(2, 3))
        );
    }
}
