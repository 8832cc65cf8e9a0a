use planar_linalg::{Mat3, SVD_EPS};

use crate::error::WarpError;

/// The nine coefficients of a projective transform, read once per call.
///
/// A point `(x, y)` maps to `(X / W, Y / W)` with
///
/// ```text
/// X = m00 * x + m01 * y + m02
/// Y = m10 * x + m11 * y + m12
/// W = m20 * x + m21 * y + m22
/// ```
#[derive(Debug, Clone, Copy)]
pub(crate) struct Projection {
    pub m00: f32,
    pub m01: f32,
    pub m02: f32,
    pub m10: f32,
    pub m11: f32,
    pub m12: f32,
    pub m20: f32,
    pub m21: f32,
    pub m22: f32,
}

impl From<&Mat3> for Projection {
    fn from(m: &Mat3) -> Self {
        Self {
            m00: m.get(0, 0),
            m01: m.get(0, 1),
            m02: m.get(0, 2),
            m10: m.get(1, 0),
            m11: m.get(1, 1),
            m12: m.get(1, 2),
            m20: m.get(2, 0),
            m21: m.get(2, 1),
            m22: m.get(2, 2),
        }
    }
}

impl Projection {
    /// Project one point, writing NaN for both coordinates when `|W| < SVD_EPS`.
    ///
    /// The operation order matches the lane path exactly so both produce identical bits.
    #[inline(always)]
    pub fn apply(&self, [x, y]: [f32; 2]) -> [f32; 2] {
        let px = self.m00 * x + self.m01 * y + self.m02;
        let py = self.m10 * x + self.m11 * y + self.m12;
        let w = self.m20 * x + self.m21 * y + self.m22;

        // written as `>=` so a NaN `w` lands on the invalid side, like the lane mask
        if w.abs() >= SVD_EPS {
            let inv_w = 1.0 / w;
            [px * inv_w, py * inv_w]
        } else {
            [f32::NAN, f32::NAN]
        }
    }

    /// Project a run of points one at a time.
    #[inline]
    pub fn apply_slice(&self, src: &[[f32; 2]], dst: &mut [[f32; 2]]) {
        for (s, d) in src.iter().zip(dst.iter_mut()) {
            *d = self.apply(*s);
        }
    }
}

/// Project a single point through `m`.
///
/// Returns `None` when the homogeneous coordinate is within `SVD_EPS` of zero, i.e. the point is
/// sent towards the line at infinity.
///
/// Example:
///
/// ```
/// use planar_linalg::Mat3;
/// use planar_warp::project_point;
///
/// let m = Mat3::from_rows([[2.0, 0.0, 1.0], [0.0, 2.0, 0.0], [0.0, 0.0, 1.0]]);
/// assert_eq!(project_point(&m, [1.0, 1.0]), Some([3.0, 2.0]));
///
/// let m = Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, -1.0]]);
/// assert_eq!(project_point(&m, [1.0, 5.0]), None);
/// ```
pub fn project_point(m: &Mat3, p: [f32; 2]) -> Option<[f32; 2]> {
    let q = Projection::from(m).apply(p);
    is_valid_point(&q).then_some(q)
}

/// Whether a projected point holds a valid result rather than the NaN sentinel.
#[inline]
pub fn is_valid_point(p: &[f32; 2]) -> bool {
    !(p[0].is_nan() || p[1].is_nan())
}

/// Project a batch of points one at a time, without vector lanes.
///
/// Same contract as [`crate::transform_points`]; exposed so the lane path can be checked
/// against it and for targets where the `simd` feature is disabled.
pub fn transform_points_scalar(
    m: &Mat3,
    src: &[[f32; 2]],
    dst: &mut [[f32; 2]],
) -> Result<(), WarpError> {
    check_lengths(src, dst)?;
    Projection::from(m).apply_slice(src, dst);
    Ok(())
}

pub(crate) fn check_lengths(src: &[[f32; 2]], dst: &[[f32; 2]]) -> Result<(), WarpError> {
    if src.len() != dst.len() {
        return Err(WarpError::LengthMismatch(src.len(), dst.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_point_translation() {
        let m = Mat3::from_rows([[1.0, 0.0, -1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]]);
        assert_eq!(project_point(&m, [1.0, 1.0]), Some([0.0, 2.0]));
    }

    #[test]
    fn transform_point_perspective() {
        let m = Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.5, 0.0, 1.0]]);
        // w = 0.5 * 2 + 1 = 2
        assert_eq!(project_point(&m, [2.0, 4.0]), Some([1.0, 2.0]));
    }

    #[test]
    fn transform_point_near_zero_w() {
        let m = Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1e-7]]);
        assert_eq!(project_point(&m, [3.0, 4.0]), None);
        let q = Projection::from(&m).apply([3.0, 4.0]);
        assert!(q[0].is_nan() && q[1].is_nan());
    }

    #[test]
    fn transform_point_nan_input() {
        assert_eq!(project_point(&Mat3::IDENTITY, [f32::NAN, 1.0]), None);
    }

    #[test]
    fn transform_points_scalar_length_mismatch() {
        let src = [[0.0, 0.0]; 3];
        let mut dst = [[0.0, 0.0]; 2];
        assert_eq!(
            transform_points_scalar(&Mat3::IDENTITY, &src, &mut dst),
            Err(WarpError::LengthMismatch(3, 2))
        );
    }

    #[test]
    fn valid_point() {
        assert!(is_valid_point(&[0.0, -1.0]));
        assert!(!is_valid_point(&[f32::NAN, 0.0]));
        assert!(!is_valid_point(&[0.0, f32::NAN]));
    }
}
