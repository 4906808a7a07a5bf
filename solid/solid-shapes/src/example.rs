//! Demonstration models for the catalog.
//!
//! Each catalog shape provides a default instance and a list of anchors
//! worth looking at. [`HasExample::example`] builds a model of the shape with
//! a small cone marker standing on every listed anchor, pointing along the
//! anchor's Z axis.

use std::sync::Arc;

use solid_maker::{Maker, MakerResult, Shape, ShapeExt, WithAttributes};
use solid_types::{AnchorPath, Colour};
use tracing::debug;

use crate::cone::Cone;

/// Name of the demonstrated shape's entry in an example model.
pub const EXAMPLE_ROOT_NAME: &str = "default";

const MARKER_LENGTH: f64 = 10.0;
const MARKER_RADIUS: f64 = 1.0;

/// Where an example anchor sits relative to the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// On the surface; the marker is drawn solid.
    Surface,
    /// Inside the shape; the marker is drawn transparent.
    Inner,
}

/// An anchor demonstrated by an example.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleAnchor {
    path: AnchorPath,
    kind: AnchorKind,
}

impl ExampleAnchor {
    /// An anchor on the shape's surface.
    #[must_use]
    pub const fn surface(path: AnchorPath) -> Self {
        Self {
            path,
            kind: AnchorKind::Surface,
        }
    }

    /// An anchor inside the shape.
    #[must_use]
    pub const fn inner(path: AnchorPath) -> Self {
        Self {
            path,
            kind: AnchorKind::Inner,
        }
    }

    /// Anchor path on the shape.
    #[must_use]
    pub const fn path(&self) -> &AnchorPath {
        &self.path
    }

    /// Surface or inner.
    #[must_use]
    pub const fn kind(&self) -> AnchorKind {
        self.kind
    }

    /// Entry name of the anchor's marker.
    #[must_use]
    pub fn marker_name(&self) -> String {
        self.path.to_string()
    }
}

/// A built example: the model and the anchors it marks.
#[derive(Debug, Clone)]
pub struct Example {
    maker: Maker,
    anchors: Vec<ExampleAnchor>,
}

impl Example {
    /// The example model.
    #[must_use]
    pub const fn maker(&self) -> &Maker {
        &self.maker
    }

    /// Consume the example, keeping the model.
    #[must_use]
    pub fn into_maker(self) -> Maker {
        self.maker
    }

    /// The demonstrated shape.
    #[must_use]
    pub fn shape(&self) -> Option<&Arc<dyn Shape>> {
        self.maker.root().map(|entry| entry.shape())
    }

    /// The anchors marked in the model.
    #[must_use]
    pub fn anchors(&self) -> &[ExampleAnchor] {
        &self.anchors
    }
}

/// Catalog shapes with a demonstration model.
pub trait HasExample: Shape + Sized + 'static {
    /// The instance shown in the example.
    ///
    /// # Errors
    ///
    /// Returns whatever the shape's constructor returns.
    fn example_shape() -> MakerResult<Self>;

    /// Anchors marked in the example.
    fn example_anchors() -> Vec<ExampleAnchor> {
        Vec::new()
    }

    /// Build the example model.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape cannot be built or one of its example
    /// anchors does not resolve.
    fn example() -> MakerResult<Example> {
        build_example(Self::example_shape()?, Self::example_anchors())
    }
}

/// Build a model of `shape` with a marker on each of `anchors`.
///
/// # Errors
///
/// Returns an error if an anchor does not resolve or two anchors share a name.
pub fn build_example<S: Shape + 'static>(
    shape: S,
    anchors: Vec<ExampleAnchor>,
) -> MakerResult<Example> {
    let mut maker = shape.solid(EXAMPLE_ROOT_NAME).at_origin();
    for anchor in &anchors {
        let frame = maker.anchor(anchor.path())?;
        let marker = Cone::new(MARKER_LENGTH, MARKER_RADIUS, 0.0)?
            .solid(anchor.marker_name())
            .colour(Colour::rgb(1.0, 0.0, 0.0));
        let marker = match anchor.kind() {
            AnchorKind::Surface => marker,
            AnchorKind::Inner => marker.transparent(true),
        };
        debug!(anchor = %anchor.path(), "example marker");
        maker.add_at_frame(marker.at_origin(), &frame)?;
    }
    Ok(Example { maker, anchors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cuboid, Sphere};
    use solid_types::{ShapeName, anchor_path};

    #[test]
    fn test_marker_names_follow_paths() {
        let a = ExampleAnchor::surface(anchor_path!("face_corner", 0, 2));
        assert_eq!(a.marker_name(), "'face_corner', 0, 2");
        assert_eq!(a.kind(), AnchorKind::Surface);
    }

    #[test]
    fn test_example_places_markers() {
        let example = Sphere::example().unwrap();
        let maker = example.maker();
        assert_eq!(maker.len(), 1 + example.anchors().len());

        let top = maker.entry(&ShapeName::text("'top'")).unwrap();
        assert_eq!(*top.frame(), solid_types::Frame::translation(0.0, 0.0, 20.0));

        let centre = maker.entry(&ShapeName::text("'centre'")).unwrap();
        assert_eq!(centre.attributes().transparent, Some(true));
        assert_eq!(example.shape().unwrap().type_name(), "Sphere");
    }

    #[test]
    fn test_bad_example_anchor_fails() {
        let cuboid = Cuboid::cube(1.0).unwrap();
        let result = build_example(cuboid, vec![ExampleAnchor::inner(anchor_path!("middle"))]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_example_anchor_fails() {
        let cuboid = Cuboid::cube(1.0).unwrap();
        let anchor = ExampleAnchor::inner(anchor_path!("centre"));
        let result = build_example(cuboid, vec![anchor.clone(), anchor]);
        assert!(result.is_err());
    }
}
