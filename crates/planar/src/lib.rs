#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! The typed API lives in [`linalg`] (3x3 product, determinant and inverse, 8x8 homography solve)
//! and [`warp`] (point projection). [`buffer`] exposes the same operations over flat `f32`
//! slices with explicit length checks.
//!
//! ```
//! use planar::{linalg, warp};
//!
//! let src = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]];
//! let dst = [[1.0, 1.0], [5.0, 1.5], [5.5, 5.0], [0.5, 4.5]];
//!
//! let (a, b) = linalg::homography_system(&src, &dst);
//! let h = linalg::solve_homography(&a, &b).unwrap().to_homography();
//!
//! let mut out = [[0.0; 2]; 4];
//! warp::transform_points(&h, &src, &mut out).unwrap();
//! for (p, q) in out.iter().zip(dst.iter()) {
//!     assert!((p[0] - q[0]).abs() < 1e-3 && (p[1] - q[1]).abs() < 1e-3);
//! }
//! ```

/// Operations over flat `f32` buffers.
pub mod buffer;

#[doc(inline)]
pub use planar_linalg as linalg;

#[doc(inline)]
pub use planar_warp as warp;

pub use buffer::BufferError;
