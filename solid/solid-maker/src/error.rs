//! Error types for composition and rendering.

use solid_types::{FrameError, ParseModeError, ShapeName};
use thiserror::Error;

/// Result type for composition operations.
pub type MakerResult<T> = Result<T, MakerError>;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while building a composition or resolving anchors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MakerError {
    /// The anchor name is not known to the shape.
    #[error("unknown anchor '{anchor}' on {shape}; available: {}", available.join(", "))]
    UnknownAnchor {
        /// Type of the shape that was queried.
        shape: String,
        /// The name that failed to resolve.
        anchor: String,
        /// Names the shape does know.
        available: Vec<String>,
    },

    /// The anchor exists but its arguments are wrong.
    #[error("invalid arguments for anchor '{anchor}' on {shape}: {reason}")]
    InvalidAnchorArgs {
        /// Type of the shape that was queried.
        shape: String,
        /// The anchor being resolved.
        anchor: String,
        /// What was wrong.
        reason: String,
    },

    /// An entry with this name already exists in the composition.
    #[error("an entry named {name} already exists")]
    NameCollision {
        /// The duplicate name.
        name: ShapeName,
    },

    /// A shape was constructed with an invalid parameter.
    #[error("invalid parameter for {shape}: {reason}")]
    InvalidParameter {
        /// Type of the shape being constructed.
        shape: String,
        /// What was wrong.
        reason: String,
    },

    /// A transform could not be computed.
    #[error("degenerate transform: {0}")]
    Degenerate(#[from] FrameError),

    /// A composition mode name could not be parsed.
    #[error(transparent)]
    InvalidCompositionMode(#[from] ParseModeError),
}

/// Errors raised by the render engine.
///
/// Stack errors indicate a traversal that did not balance its pushes and
/// pops; they are not caused by model content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// An object was added with no container on the stack.
    #[error("render stack is empty")]
    EmptyRenderStack,

    /// The render was closed with entries still pushed.
    #[error("{count} items remain on the render stack")]
    UnpoppedItemsOnRenderStack {
        /// Number of entries above the root.
        count: usize,
    },

    /// `pop` was called more times than `push`.
    #[error("pop() called more times than push()")]
    PopCalledTooManyTimes,

    /// The shape does not know how to render itself.
    #[error("render is not implemented for {shape}")]
    Unimplemented {
        /// Type of the shape.
        shape: String,
    },
}
