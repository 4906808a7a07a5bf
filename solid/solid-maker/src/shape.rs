//! The shape contract.

use std::fmt;
use std::sync::Arc;

use solid_types::{AnchorPath, CompositionMode, Frame, ShapeName};

use crate::error::{MakerResult, RenderError, RenderResult};
use crate::named::NamedShape;
use crate::render::Renderer;

/// Anything that can be placed in a composition.
///
/// A shape resolves anchor paths in its own local coordinates and knows how
/// to emit itself into a [`Renderer`]. Compositions ([`Maker`](crate::Maker))
/// are shapes too, so trees nest.
pub trait Shape: fmt::Debug + Send + Sync {
    /// Type name used in errors and the provenance graph.
    fn type_name(&self) -> &str;

    /// Resolve an anchor path to a frame in this shape's local space.
    ///
    /// The empty path resolves to the identity.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::UnknownAnchor`](crate::MakerError::UnknownAnchor)
    /// for unknown names and
    /// [`MakerError::InvalidAnchorArgs`](crate::MakerError::InvalidAnchorArgs)
    /// for bad arguments.
    fn anchor(&self, path: &AnchorPath) -> MakerResult<Frame>;

    /// Names accepted as the head of an anchor path.
    fn anchor_names(&self) -> Vec<String>;

    /// Whether `name` is accepted as the head of an anchor path.
    fn has_anchor(&self, name: &str) -> bool {
        self.anchor_names().iter().any(|n| n == name)
    }

    /// Emit this shape into `renderer`.
    ///
    /// # Errors
    ///
    /// The default returns [`RenderError::Unimplemented`].
    fn render(&self, renderer: &mut Renderer) -> RenderResult<()> {
        let _ = renderer;
        Err(RenderError::Unimplemented {
            shape: self.type_name().to_string(),
        })
    }
}

/// Wrapping a shape as a named entry of a composition.
///
/// Implemented for every sized [`Shape`]. Each method consumes the shape and
/// tags it with a [`CompositionMode`].
///
/// # Example
///
/// ```
/// use solid_maker::{Maker, ShapeExt};
/// use solid_types::CompositionMode;
/// # use solid_maker::{MakerResult, Shape};
/// # use solid_types::{AnchorPath, Frame};
/// # #[derive(Debug)]
/// # struct Dot;
/// # impl Shape for Dot {
/// #     fn type_name(&self) -> &str { "Dot" }
/// #     fn anchor(&self, _: &AnchorPath) -> MakerResult<Frame> { Ok(Frame::identity()) }
/// #     fn anchor_names(&self) -> Vec<String> { Vec::new() }
/// # }
///
/// let named = Dot.hole("vent");
/// assert_eq!(named.mode(), CompositionMode::Hole);
/// let maker: Maker = named.at_origin();
/// assert_eq!(maker.len(), 1);
/// ```
pub trait ShapeExt: Shape + Sized + 'static {
    /// Wrap with an explicit mode.
    fn named(self, mode: CompositionMode, name: impl Into<ShapeName>) -> NamedShape {
        NamedShape::new(Arc::new(self), mode, name)
    }

    /// Wrap as a solid.
    fn solid(self, name: impl Into<ShapeName>) -> NamedShape {
        self.named(CompositionMode::Solid, name)
    }

    /// Wrap as a hole.
    fn hole(self, name: impl Into<ShapeName>) -> NamedShape {
        self.named(CompositionMode::Hole, name)
    }

    /// Wrap as a cage.
    fn cage(self, name: impl Into<ShapeName>) -> NamedShape {
        self.named(CompositionMode::Cage, name)
    }

    /// Wrap as a composite.
    fn composite(self, name: impl Into<ShapeName>) -> NamedShape {
        self.named(CompositionMode::Composite, name)
    }

    /// Wrap as an intersection.
    fn intersect(self, name: impl Into<ShapeName>) -> NamedShape {
        self.named(CompositionMode::Intersect, name)
    }

    /// Wrap as a hull.
    fn hull(self, name: impl Into<ShapeName>) -> NamedShape {
        self.named(CompositionMode::Hull, name)
    }

    /// Wrap as a Minkowski sum.
    fn minkowski(self, name: impl Into<ShapeName>) -> NamedShape {
        self.named(CompositionMode::Minkowski, name)
    }

    /// Wrap as a hole if `is_hole`, otherwise as a solid.
    fn solid_hole(self, name: impl Into<ShapeName>, is_hole: bool) -> NamedShape {
        let mode = if is_hole {
            CompositionMode::Hole
        } else {
            CompositionMode::Solid
        };
        self.named(mode, name)
    }

    /// Wrap as a cage if `is_cage`, otherwise as a solid.
    fn solid_cage(self, name: impl Into<ShapeName>, is_cage: bool) -> NamedShape {
        let mode = if is_cage {
            CompositionMode::Cage
        } else {
            CompositionMode::Solid
        };
        self.named(mode, name)
    }
}

impl<T: Shape + 'static> ShapeExt for T {}
