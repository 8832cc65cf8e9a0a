use crate::types::Mat3;

/// Multiply two 3x3 matrices, `a * b`.
///
/// The result is a new value, so the output can never alias the inputs.
///
/// Example:
///
/// ```
/// use planar_linalg::{mul_mat3, Mat3};
///
/// let a = Mat3::from_rows([[1.0, 0.0, 2.0], [0.0, 1.0, 3.0], [0.0, 0.0, 1.0]]);
/// let c = mul_mat3(&a, &Mat3::IDENTITY);
/// assert_eq!(c, a);
/// ```
pub fn mul_mat3(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = Mat3::ZERO;
    for (out_col, b_col) in out.0.iter_mut().zip(b.0.iter()) {
        for (r, v) in out_col.iter_mut().enumerate() {
            *v = a.get(r, 0) * b_col[0] + a.get(r, 1) * b_col[1] + a.get(r, 2) * b_col[2];
        }
    }
    out
}

/// Closed-form determinant of a 3x3 matrix.
///
/// Returns NaN only when the input holds NaN.
#[rustfmt::skip]
pub fn det_mat3(m: &Mat3) -> f32 {
    m.get(0, 0) * (m.get(1, 1) * m.get(2, 2) - m.get(1, 2) * m.get(2, 1)) -
    m.get(0, 1) * (m.get(1, 0) * m.get(2, 2) - m.get(1, 2) * m.get(2, 0)) +
    m.get(0, 2) * (m.get(1, 0) * m.get(2, 1) - m.get(1, 1) * m.get(2, 0))
}

impl std::ops::Mul for Mat3 {
    type Output = Mat3;

    #[inline]
    fn mul(self, rhs: Mat3) -> Mat3 {
        mul_mat3(&self, &rhs)
    }
}

impl std::ops::Mul for &Mat3 {
    type Output = Mat3;

    #[inline]
    fn mul(self, rhs: &Mat3) -> Mat3 {
        mul_mat3(self, rhs)
    }
}
