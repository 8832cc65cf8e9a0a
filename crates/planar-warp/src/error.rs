/// An error type for the point projection routines.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WarpError {
    /// Source and destination batches have different point counts.
    #[error("Source and destination point counts differ ({0} != {1})")]
    LengthMismatch(usize, usize),

    /// A flat buffer does not hold whole (x, y) pairs.
    #[error("Flat point buffer length ({0}) is not a multiple of 2")]
    InvalidLength(usize),
}
