#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Every routine works on fixed-size, stack allocated values and holds no state between calls, so
//! all of them are reentrant and safe to call from many threads on disjoint data.
//!
//! Matrices are **column-major**; see [`types`] for the exact layout contract.

/// Numerical thresholds fixed at build time.
pub mod constants;

/// Error types for the linear algebra routines.
pub mod error;

/// Homography estimation from an 8x8 linear system.
pub mod homography;

/// LU factorization and inversion of 3x3 matrices.
pub mod lu;

/// Matrix product and determinant.
pub mod ops;

/// Singular value decomposition of 8x8 matrices.
pub mod svd;

/// Fixed-size matrix and vector types.
pub mod types;

pub use constants::{INV_EPS, SVD_EPS};
pub use error::LinalgError;
pub use homography::{homography_system, solve_homography, solve_homography_into};
pub use lu::{invert_mat3, invert_mat3_into, Lu3};
pub use ops::{det_mat3, mul_mat3};
pub use types::{Mat3, Mat8, Vec8};
