//! Numerical thresholds shared by every operation in the workspace.
//!
//! These are fixed at build time and read-only; no call takes them as a parameter.

/// Magnitude below which a 3x3 determinant marks the matrix as non-invertible.
pub const INV_EPS: f32 = 1e-7;

/// Relative singular value cutoff for the homography solver.
///
/// Also used as the absolute cutoff on the homogeneous coordinate `w` when projecting points.
pub const SVD_EPS: f32 = 1e-6;

/// Maximum number of Jacobi sweeps before the 8x8 SVD gives up.
pub const MAX_SWEEPS: usize = 64;
