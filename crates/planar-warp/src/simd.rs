use planar_linalg::{Mat3, SVD_EPS};
use wide::*;

use crate::{
    error::WarpError,
    scalar::{check_lengths, Projection},
};

/// Number of points projected per vector operation.
pub const LANES: usize = 4;

/// Project a batch of points four at a time with `wide::f32x4`.
///
/// Each group of [`LANES`] interleaved points is split into an `x` and a `y` lane vector, pushed
/// through the transform, and a per-lane mask built from `|W| >= SVD_EPS` selects between the
/// projected value and NaN, so the loop body has no branches. The trailing
/// `src.len() % LANES` points go through the scalar path with the same formula and threshold,
/// which yields bit-identical results.
///
/// # Errors
///
/// Returns [`WarpError::LengthMismatch`] if `src` and `dst` differ in length; `dst` is untouched.
pub fn transform_points_simd(
    m: &Mat3,
    src: &[[f32; 2]],
    dst: &mut [[f32; 2]],
) -> Result<(), WarpError> {
    check_lengths(src, dst)?;

    let proj = Projection::from(m);

    // broadcast each coefficient once
    let m00 = f32x4::splat(proj.m00);
    let m01 = f32x4::splat(proj.m01);
    let m02 = f32x4::splat(proj.m02);
    let m10 = f32x4::splat(proj.m10);
    let m11 = f32x4::splat(proj.m11);
    let m12 = f32x4::splat(proj.m12);
    let m20 = f32x4::splat(proj.m20);
    let m21 = f32x4::splat(proj.m21);
    let m22 = f32x4::splat(proj.m22);

    let eps = f32x4::splat(SVD_EPS);
    let one = f32x4::splat(1.0);
    let nan = f32x4::splat(f32::NAN);

    let mut src_chunks = src.chunks_exact(LANES);
    let mut dst_chunks = dst.chunks_exact_mut(LANES);

    for (s, d) in (&mut src_chunks).zip(&mut dst_chunks) {
        // x0 y0 x1 y1 x2 y2 x3 y3 -> x0 x1 x2 x3, y0 y1 y2 y3
        let x = f32x4::new([s[0][0], s[1][0], s[2][0], s[3][0]]);
        let y = f32x4::new([s[0][1], s[1][1], s[2][1], s[3][1]]);

        let px = m00 * x + m01 * y + m02;
        let py = m10 * x + m11 * y + m12;
        let w = m20 * x + m21 * y + m22;

        let valid = w.abs().cmp_ge(eps);
        let inv_w = one / w;

        let xs = valid.blend(px * inv_w, nan).to_array();
        let ys = valid.blend(py * inv_w, nan).to_array();

        // back to interleaved storage
        for ((p, x), y) in d.iter_mut().zip(xs).zip(ys) {
            *p = [x, y];
        }
    }

    proj.apply_slice(src_chunks.remainder(), dst_chunks.into_remainder());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::transform_points_scalar;
    use rand::Rng;

    fn assert_bitwise_eq(a: &[[f32; 2]], b: &[[f32; 2]]) {
        assert_eq!(a.len(), b.len());
        for (i, (p, q)) in a.iter().zip(b.iter()).enumerate() {
            for k in 0..2 {
                if p[k].is_nan() {
                    assert!(q[k].is_nan(), "point {i}: {p:?} vs {q:?}");
                } else {
                    assert_eq!(p[k].to_bits(), q[k].to_bits(), "point {i}: {p:?} vs {q:?}");
                }
            }
        }
    }

    #[test]
    fn simd_matches_scalar_random() -> Result<(), WarpError> {
        let mut rng = rand::rng();
        let m = Mat3::from_rows([
            [1.1, 0.2, 3.0],
            [-0.1, 0.9, -2.0],
            [0.01, -0.02, 1.0],
        ]);
        for n in [0, 1, 3, 4, 5, 8, 103] {
            let src: Vec<[f32; 2]> = (0..n)
                .map(|_| [rng.random_range(-200.0..200.0), rng.random_range(-200.0..200.0)])
                .collect();
            let mut dst_simd = vec![[0.0; 2]; n];
            let mut dst_scalar = vec![[0.0; 2]; n];
            transform_points_simd(&m, &src, &mut dst_simd)?;
            transform_points_scalar(&m, &src, &mut dst_scalar)?;
            assert_bitwise_eq(&dst_simd, &dst_scalar);
        }
        Ok(())
    }

    #[test]
    fn simd_matches_scalar_degenerate_lanes() -> Result<(), WarpError> {
        // w = x - 1, zero for every point with x == 1, both inside a lane group and in the tail
        let m = Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, -1.0]]);
        let src = [
            [1.0, 0.0],
            [2.0, 1.0],
            [f32::NAN, 1.0],
            [1.0, 7.0],
            [1.0 + 1e-7, 2.0],
            [0.5, 0.5],
            [1.0, 1.0],
        ];
        let mut dst_simd = [[0.0; 2]; 7];
        let mut dst_scalar = [[0.0; 2]; 7];
        transform_points_simd(&m, &src, &mut dst_simd)?;
        transform_points_scalar(&m, &src, &mut dst_scalar)?;
        assert_bitwise_eq(&dst_simd, &dst_scalar);
        assert!(dst_simd[0][0].is_nan() && dst_simd[0][1].is_nan());
        assert!(dst_simd[3][0].is_nan() && dst_simd[6][1].is_nan());
        assert_eq!(dst_simd[1], [2.0, 1.0]);
        Ok(())
    }

    #[test]
    fn simd_length_mismatch_leaves_dst() {
        let src = [[1.0, 2.0]; 5];
        let mut dst = [[9.0, 9.0]; 4];
        assert_eq!(
            transform_points_simd(&Mat3::IDENTITY, &src, &mut dst),
            Err(WarpError::LengthMismatch(5, 4))
        );
        assert_eq!(dst, [[9.0, 9.0]; 4]);
    }
}
