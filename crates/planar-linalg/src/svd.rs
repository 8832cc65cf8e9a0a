//! Singular value decomposition of 8x8 matrices.
//!
//! One-sided Jacobi (Hestenes) iteration: columns of a working copy of `A` are rotated in pairs
//! until they are mutually orthogonal, with the same rotations accumulated into `V`. At that point
//! the working matrix equals `U * S`, so the singular values are its column norms.
//!
//! ```text
//! A = U S Vᵀ
//! ```
//!
//! The input is divided by its largest absolute element before sweeping, so the result does not
//! depend on the magnitude of `A`, only on its conditioning.
//!
//! Unlike the branch-free 3x3 kernels this one sweeps until no pair needs a rotation, and it
//! reports failure when the sweep budget [`MAX_SWEEPS`] runs out.
//!
//! # Example
//!
//! ```
//! use planar_linalg::{svd::Svd8, Mat8};
//!
//! let svd = Svd8::new(&Mat8::IDENTITY).unwrap();
//! assert!(svd.singular_values().iter().all(|&s| s == 1.0));
//! ```

use crate::{
    constants::MAX_SWEEPS,
    error::LinalgError,
    types::{Mat8, Vec8},
};

/// Two columns are treated as orthogonal once their normalized dot product drops below this.
const ORTHOGONALITY_TOL: f32 = 8.0 * f32::EPSILON;

/// Result of an 8x8 singular value decomposition.
#[derive(Debug, Clone)]
pub struct Svd8 {
    /// Left singular vectors, one per column.
    u: Mat8,
    /// Singular values sorted in non-increasing order.
    s: [f32; 8],
    /// Right singular vectors, one per column.
    v: Mat8,
    /// Number of sweeps it took to converge.
    sweeps: usize,
}

impl Svd8 {
    /// Decompose `a`.
    ///
    /// # Errors
    ///
    /// * [`LinalgError::InvalidInput`] if `a` holds NaN or infinite values.
    /// * [`LinalgError::SvdNotConverged`] if the columns are still not orthogonal after
    ///   [`MAX_SWEEPS`] sweeps.
    pub fn new(a: &Mat8) -> Result<Self, LinalgError> {
        if !a.is_finite() {
            return Err(LinalgError::InvalidInput);
        }

        // unit max magnitude keeps the column dot products in range; undone on `s` below
        let scale = a.as_slice().iter().fold(0.0f32, |acc, x| acc.max(x.abs()));
        let mut w = *a;
        if scale > 0.0 {
            w.as_mut_slice().iter_mut().for_each(|x| *x /= scale);
        }
        let mut v = Mat8::IDENTITY;

        let mut sweeps = 0;
        let mut converged = false;
        while sweeps < MAX_SWEEPS {
            sweeps += 1;
            let mut rotated = false;
            for p in 0..7 {
                for q in (p + 1)..8 {
                    rotated |= orthogonalize_pair(&mut w, &mut v, p, q);
                }
            }
            if !rotated {
                converged = true;
                break;
            }
        }

        if !converged {
            log::warn!("jacobi svd did not converge after {sweeps} sweeps");
            return Err(LinalgError::SvdNotConverged { sweeps });
        }

        // singular values are the column norms; U is W with normalized columns
        let mut s = [0.0f32; 8];
        let mut u = Mat8::ZERO;
        for (j, (col, s_j)) in w.0.iter().zip(s.iter_mut()).enumerate() {
            let norm = norm(col);
            *s_j = norm * scale;
            if norm > 0.0 {
                for (dst, &src) in u.0[j].iter_mut().zip(col.iter()) {
                    *dst = src / norm;
                }
            }
        }

        // sort in non-increasing order, permuting U and V columns alongside
        let mut order = [0usize, 1, 2, 3, 4, 5, 6, 7];
        order.sort_by(|&i, &j| s[j].total_cmp(&s[i]));

        let mut sorted = Svd8 {
            u: Mat8::ZERO,
            s: [0.0; 8],
            v: Mat8::ZERO,
            sweeps,
        };
        for (dst, &src) in order.iter().enumerate() {
            sorted.s[dst] = s[src];
            sorted.u.0[dst] = u.0[src];
            sorted.v.0[dst] = v.0[src];
        }

        Ok(sorted)
    }

    /// Left singular vectors.
    #[inline]
    pub fn u(&self) -> &Mat8 {
        &self.u
    }

    /// Singular values in non-increasing order.
    #[inline]
    pub fn singular_values(&self) -> &[f32; 8] {
        &self.s
    }

    /// Right singular vectors.
    #[inline]
    pub fn v(&self) -> &Mat8 {
        &self.v
    }

    /// Number of Jacobi sweeps performed.
    #[inline]
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Least squares solution of `A * x = b` through the pseudo-inverse, `x = V S⁺ Uᵀ b`.
    ///
    /// Zero singular values are skipped. Callers that need a conditioning guarantee check the
    /// singular values first.
    pub fn solve(&self, b: &Vec8) -> Vec8 {
        let mut x = Vec8::ZERO;
        for ((u_j, v_j), &s_j) in self.u.0.iter().zip(self.v.0.iter()).zip(self.s.iter()) {
            if s_j == 0.0 {
                continue;
            }
            let coeff = dot(u_j, &b.0) / s_j;
            for (x_i, &v_ij) in x.0.iter_mut().zip(v_j.iter()) {
                *x_i += coeff * v_ij;
            }
        }
        x
    }
}

/// Rotate columns `p` and `q` of `w` so they become orthogonal, applying the same rotation to `v`.
///
/// Returns `false` when the pair was already orthogonal and nothing changed.
fn orthogonalize_pair(w: &mut Mat8, v: &mut Mat8, p: usize, q: usize) -> bool {
    let alpha = dot(&w.0[p], &w.0[p]);
    let beta = dot(&w.0[q], &w.0[q]);
    let gamma = dot(&w.0[p], &w.0[q]);

    if gamma == 0.0 || gamma.abs() <= ORTHOGONALITY_TOL * alpha.sqrt() * beta.sqrt() {
        return false;
    }

    let zeta = (beta - alpha) / (2.0 * gamma);
    let t = if zeta >= 0.0 {
        1.0 / (zeta + (1.0 + zeta * zeta).sqrt())
    } else {
        -1.0 / (-zeta + (1.0 + zeta * zeta).sqrt())
    };
    let c = 1.0 / (1.0 + t * t).sqrt();
    let s = c * t;

    rotate_columns(w, p, q, c, s);
    rotate_columns(v, p, q, c, s);
    true
}

#[inline]
fn rotate_columns(m: &mut Mat8, p: usize, q: usize, c: f32, s: f32) {
    let (left, right) = m.0.split_at_mut(q);
    let (col_p, col_q) = (&mut left[p], &mut right[0]);
    for (a, b) in col_p.iter_mut().zip(col_q.iter_mut()) {
        let (ap, aq) = (*a, *b);
        *a = c * ap - s * aq;
        *b = s * ap + c * aq;
    }
}

#[inline]
fn dot(a: &[f32; 8], b: &[f32; 8]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
fn norm(a: &[f32; 8]) -> f32 {
    dot(a, a).sqrt()
}
