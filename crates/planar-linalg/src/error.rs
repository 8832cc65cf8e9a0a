use thiserror::Error;

/// An error type for the linear algebra routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// The determinant is too small to invert the matrix.
    #[error("Matrix is singular: |det| = {det} is below the inversion threshold")]
    Singular {
        /// Determinant obtained from the LU factors.
        det: f32,
    },

    /// A singular value fell below the relative threshold.
    #[error("System is rank deficient: singular value {min} < threshold {threshold}")]
    RankDeficient {
        /// Smallest singular value.
        min: f32,
        /// Threshold it was compared against.
        threshold: f32,
    },

    /// The Jacobi iteration did not converge within the sweep budget.
    #[error("SVD did not converge after {sweeps} sweeps")]
    SvdNotConverged {
        /// Number of sweeps performed.
        sweeps: usize,
    },

    /// The input contains NaN or infinite values.
    #[error("Input contains non-finite values")]
    InvalidInput,

    /// The computation produced NaN or infinite values.
    #[error("Result contains non-finite values")]
    NonFiniteResult,

    /// A flat buffer does not have the expected number of elements.
    #[error("Invalid buffer length. Expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected number of elements.
        expected: usize,
        /// Actual number of elements.
        actual: usize,
    },
}
