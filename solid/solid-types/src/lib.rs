//! Core value types for anchored solid composition.
//!
//! This crate provides the foundational types that the composition tree and
//! render engine are built on:
//!
//! - [`Frame`] - An immutable 4x4 affine transform (translation, rotation, scale)
//! - [`AnchorPath`] - A path of positional and named components selecting an anchor
//! - [`ShapeName`] - A text or structured key naming a shape inside a composition
//! - [`Attributes`] - Mergeable, diffable render attributes (colour, flags, resolution)
//! - [`CompositionMode`] - How a subtree contributes to its parent
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero rendering dependencies**. It only knows
//! about transforms and the small value types attached to composed shapes.
//!
//! # Conventions
//!
//! Frames compose right to left: `a * b` is "apply `b`, then `a`". Angles taken
//! by constructors are in **degrees**. Coordinates are unit-agnostic `f64`.
//!
//! # Example
//!
//! ```
//! use solid_types::{Frame, anchor_path};
//! use nalgebra::Point3;
//!
//! let frame = Frame::translation(10.0, 0.0, 0.0) * Frame::rotation_z(90.0);
//! let p = frame.apply_point(&Point3::new(1.0, 0.0, 0.0));
//! assert!((p.x - 10.0).abs() < 1e-12);
//! assert!((p.y - 1.0).abs() < 1e-12);
//!
//! let path = anchor_path!("face_edge", 2, 0; t = 0.25);
//! assert_eq!(path.head_name(), Some("face_edge"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod anchor;
mod attributes;
mod error;
mod frame;
mod mode;
mod name;

pub use anchor::{AnchorArg, AnchorPath};
pub use attributes::{Attributes, Colour};
pub use error::{FrameError, FrameResult, ParseModeError};
pub use frame::{
    DEFAULT_TOLERANCE, Frame, normalize, plane_line_intersect, rotation_about_to_plane,
    rotation_to_align,
};
pub use mode::CompositionMode;
pub use name::{NamePart, ShapeName};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};
