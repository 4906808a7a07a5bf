//! Error types for frame algebra and value parsing.

use thiserror::Error;

/// Result type for frame operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors raised by degenerate transform inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// A zero-length vector was given where a direction is required.
    #[error("cannot normalize a zero-length vector in {operation}")]
    ZeroLengthVector {
        /// The operation that needed a direction.
        operation: &'static str,
    },

    /// The upper 3x3 block of the matrix is singular.
    #[error("matrix is not invertible")]
    SingularMatrix,

    /// The matrix does not have `[0, 0, 0, 1]` as its last row.
    #[error("matrix is not affine: last row is {row:?}")]
    NotAffine {
        /// The offending last row.
        row: [f64; 4],
    },
}

/// Error returned when parsing an unknown composition mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid composition mode '{name}', expected one of: {}", crate::CompositionMode::NAMES.join(", "))]
pub struct ParseModeError {
    /// The name that failed to parse.
    pub name: String,
}
