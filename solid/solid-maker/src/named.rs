//! Named shapes awaiting placement.

use std::sync::Arc;

use solid_types::{AnchorPath, Attributes, Colour, CompositionMode, Frame, ShapeName};

use crate::at_spec::AtSpec;
use crate::error::MakerResult;
use crate::maker::Maker;
use crate::shape::Shape;

/// Attribute builders shared by eager and lazy named shapes.
pub trait WithAttributes: Sized {
    /// Mutable access to the attributes being built.
    fn attributes_mut(&mut self) -> &mut Attributes;

    /// Replace all attributes.
    #[must_use]
    fn with_attributes(mut self, attributes: Attributes) -> Self {
        *self.attributes_mut() = attributes;
        self
    }

    /// Set the colour.
    #[must_use]
    fn colour(mut self, colour: impl Into<Colour>) -> Self {
        let attrs = self.attributes_mut();
        *attrs = attrs.with_colour(colour);
        self
    }

    /// Set the segment count (`$fn`).
    #[must_use]
    fn segments(mut self, segments: u32) -> Self {
        let attrs = self.attributes_mut();
        *attrs = attrs.with_segments(segments);
        self
    }

    /// Set the minimum angle (`$fa`).
    #[must_use]
    fn min_angle(mut self, degrees: f64) -> Self {
        let attrs = self.attributes_mut();
        *attrs = attrs.with_min_angle(degrees);
        self
    }

    /// Set the minimum segment size (`$fs`).
    #[must_use]
    fn min_size(mut self, size: f64) -> Self {
        let attrs = self.attributes_mut();
        *attrs = attrs.with_min_size(size);
        self
    }

    /// Set the disable flag.
    #[must_use]
    fn disable(mut self, disable: bool) -> Self {
        let attrs = self.attributes_mut();
        *attrs = attrs.with_disable(disable);
        self
    }

    /// Set the show-only flag.
    #[must_use]
    fn show_only(mut self, show_only: bool) -> Self {
        let attrs = self.attributes_mut();
        *attrs = attrs.with_show_only(show_only);
        self
    }

    /// Set the debug flag.
    #[must_use]
    fn debug(mut self, debug: bool) -> Self {
        let attrs = self.attributes_mut();
        *attrs = attrs.with_debug(debug);
        self
    }

    /// Set the transparent flag.
    #[must_use]
    fn transparent(mut self, transparent: bool) -> Self {
        let attrs = self.attributes_mut();
        *attrs = attrs.with_transparent(transparent);
        self
    }

    /// Set the polyhedron output flag.
    #[must_use]
    fn use_polyhedrons(mut self, use_polyhedrons: bool) -> Self {
        let attrs = self.attributes_mut();
        *attrs = attrs.with_use_polyhedrons(use_polyhedrons);
        self
    }
}

/// A shape with a name, a mode and attributes, not yet placed.
///
/// Placing it ([`at`](Self::at), [`projection`](Self::projection), ...)
/// produces a [`Maker`] whose root entry is this shape.
#[derive(Debug, Clone)]
pub struct NamedShape {
    shape: Arc<dyn Shape>,
    mode: CompositionMode,
    name: ShapeName,
    attributes: Attributes,
}

impl WithAttributes for NamedShape {
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl NamedShape {
    /// Wrap a shared shape.
    pub fn new(shape: Arc<dyn Shape>, mode: CompositionMode, name: impl Into<ShapeName>) -> Self {
        Self {
            shape,
            mode,
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    /// The wrapped shape.
    #[must_use]
    pub fn shape(&self) -> &Arc<dyn Shape> {
        &self.shape
    }

    /// The composition mode.
    #[must_use]
    pub const fn mode(&self) -> CompositionMode {
        self.mode
    }

    /// The entry name.
    #[must_use]
    pub const fn name(&self) -> &ShapeName {
        &self.name
    }

    /// The attributes.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    // ========================================================================
    // Placement
    // ========================================================================

    /// Place so that the anchor at `path` sits at the Maker's origin.
    ///
    /// # Errors
    ///
    /// Returns the shape's anchor error if `path` does not resolve.
    pub fn at(self, path: &AnchorPath) -> MakerResult<Maker> {
        self.at_with(path, &Frame::identity(), &Frame::identity())
    }

    /// Place at `pre · anchor(path) · post`.
    ///
    /// # Errors
    ///
    /// Returns the shape's anchor error if `path` does not resolve, or
    /// [`MakerError::Degenerate`](crate::MakerError::Degenerate) if the
    /// placement is singular.
    pub fn at_with(self, path: &AnchorPath, pre: &Frame, post: &Frame) -> MakerResult<Maker> {
        let anchor = if path.is_empty() {
            Frame::identity()
        } else {
            self.shape.anchor(path)?
        };
        self.projection(pre * &anchor * *post)
    }

    /// Place using a deferred anchor spec.
    ///
    /// # Errors
    ///
    /// As for [`at_with`](Self::at_with).
    pub fn at_spec(self, spec: &AtSpec) -> MakerResult<Maker> {
        let placement = spec.apply(self.shape.as_ref())?;
        self.projection(placement)
    }

    /// Place with the shape's own origin at the Maker's origin.
    #[must_use]
    pub fn at_origin(self) -> Maker {
        Maker::from_root(self, Frame::identity())
    }

    /// Place so that `placement` (in the shape's space) becomes the Maker's origin.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::Degenerate`](crate::MakerError::Degenerate) if
    /// `placement` is singular.
    pub fn projection(self, placement: Frame) -> MakerResult<Maker> {
        let frame = placement.inverse()?;
        Ok(Maker::from_root(self, frame))
    }

    pub(crate) fn into_parts(self) -> (Arc<dyn Shape>, CompositionMode, ShapeName, Attributes) {
        (self.shape, self.mode, self.name, self.attributes)
    }
}
