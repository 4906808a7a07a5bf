//! Shapes spanning two anchors.

use std::sync::Arc;

use solid_types::{
    Frame, FrameError, Vector3, rotation_about_to_plane, rotation_to_align,
};
use tracing::debug;

use crate::at_spec::AtSpec;
use crate::error::{MakerError, MakerResult};
use crate::lazy::LazyNamedShape;
use crate::maker::Maker;
use crate::shape::Shape;

/// Spans shorter than this are rejected.
const MIN_SPAN: f64 = 1e-12;

/// Twists are skipped when the aligned axis is this close to the span.
const MIN_TWIST_LEVER: f64 = 1e-9;

/// Where to place a shape built to span two anchors.
///
/// The spanning shape is built by a [`LazyNamedShape`] from the distance
/// between `target_from` and `target_to`, then rotated so its own
/// `shape_from → shape_to` axis follows the targets. The shape's add-at anchor
/// (default `shape_from`) lands on `target_to` and `shape_to` lands on
/// `target_from`.
///
/// By default the shape is also twisted about the span so that its X axis
/// lies in the plane normal to the `target_from` anchor's X axis. Use
/// [`with_alignment`](Self::with_alignment) or
/// [`without_alignment`](Self::without_alignment) to change that.
#[derive(Debug, Clone, PartialEq)]
pub struct AddBetween {
    target_from: AtSpec,
    target_to: AtSpec,
    shape_from: AtSpec,
    shape_to: AtSpec,
    shape_add_at: Option<AtSpec>,
    align_axis: Option<Vector3<f64>>,
    align_plane: Option<Vector3<f64>>,
}

impl AddBetween {
    /// Span `target_from → target_to` with the shape's `shape_from → shape_to` axis.
    pub fn new(
        target_from: impl Into<AtSpec>,
        target_to: impl Into<AtSpec>,
        shape_from: impl Into<AtSpec>,
        shape_to: impl Into<AtSpec>,
    ) -> Self {
        Self {
            target_from: target_from.into(),
            target_to: target_to.into(),
            shape_from: shape_from.into(),
            shape_to: shape_to.into(),
            shape_add_at: None,
            align_axis: Some(Vector3::x()),
            align_plane: Some(Vector3::x()),
        }
    }

    /// Attach the built shape at this anchor instead of `shape_from`.
    #[must_use]
    pub fn with_shape_add_at(mut self, spec: impl Into<AtSpec>) -> Self {
        self.shape_add_at = Some(spec.into());
        self
    }

    /// Twist so that the shape's `axis` lies in the plane normal to the
    /// `target_from` anchor's `plane` direction.
    #[must_use]
    pub fn with_alignment(mut self, axis: Vector3<f64>, plane: Vector3<f64>) -> Self {
        self.align_axis = Some(axis);
        self.align_plane = Some(plane);
        self
    }

    /// No twist about the span.
    #[must_use]
    pub fn without_alignment(mut self) -> Self {
        self.align_axis = None;
        self.align_plane = None;
        self
    }

    /// Resolve targets against `source`, build the shape and compute its placement.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::Degenerate`] if the targets coincide or the shape
    /// anchors do, and propagates anchor and factory errors.
    pub fn solve(&self, source: &dyn Shape, lazy: &LazyNamedShape) -> MakerResult<BetweenPlacement> {
        let from_frame = self.target_from.apply(source)?;
        let to_vec = self.target_to.apply(source)?.translation_vector();
        let diff = from_frame.translation_vector() - to_vec;

        let length = diff.norm();
        if length < MIN_SPAN {
            return Err(MakerError::Degenerate(FrameError::ZeroLengthVector {
                operation: "add_between span",
            }));
        }

        let shape = lazy.build(length)?;
        let shape_from = self.shape_from.apply(shape.as_ref())?;
        let shape_to = self.shape_to.apply(shape.as_ref())?;
        let add_at = match &self.shape_add_at {
            Some(spec) => spec.apply(shape.as_ref())?,
            None => shape_from,
        };

        let add_at_inv = add_at.inverse()?;
        let span = add_at_inv.apply_point(&shape_to.origin())
            - add_at_inv.apply_point(&shape_from.origin());
        let mut align = rotation_to_align(span, diff)?;

        if let (Some(axis), Some(plane)) = (self.align_axis, self.align_plane) {
            let axis_vec = align.apply_vector(&axis);
            let plane_vec = from_frame.rotation().apply_vector(&plane);
            let unit = diff / length;
            let lever = axis_vec - unit * unit.dot(&axis_vec);
            if lever.norm() > MIN_TWIST_LEVER {
                let twist = rotation_about_to_plane(diff, axis_vec, plane_vec)?;
                align = twist * align;
            }
        }

        let placement = Frame::from_translation(to_vec) * align;
        debug!(name = %lazy.name(), length, "add_between solved");
        Ok(BetweenPlacement {
            length,
            placement,
            add_at,
            shape,
        })
    }

    /// Solve against `source` and attach the result to `target`.
    ///
    /// # Errors
    ///
    /// As for [`solve`](Self::solve), plus [`MakerError::NameCollision`].
    pub fn apply<'m>(
        &self,
        source: &dyn Shape,
        target: &'m mut Maker,
        lazy: &LazyNamedShape,
    ) -> MakerResult<&'m mut Maker> {
        let solved = self.solve(source, lazy)?;
        solved.attach(target, lazy)
    }
}

/// A solved [`AddBetween`].
#[derive(Debug, Clone)]
pub struct BetweenPlacement {
    length: f64,
    placement: Frame,
    add_at: Frame,
    shape: Arc<dyn Shape>,
}

impl BetweenPlacement {
    /// Distance between the targets, passed to the factory.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Where the shape's add-at anchor is placed.
    #[must_use]
    pub const fn placement(&self) -> &Frame {
        &self.placement
    }

    /// The add-at anchor in the built shape's space.
    #[must_use]
    pub const fn add_at(&self) -> &Frame {
        &self.add_at
    }

    /// The built shape.
    #[must_use]
    pub fn shape(&self) -> &Arc<dyn Shape> {
        &self.shape
    }

    fn attach<'m>(self, target: &'m mut Maker, lazy: &LazyNamedShape) -> MakerResult<&'m mut Maker> {
        let child = lazy.to_named_shape(self.shape).projection(self.add_at)?;
        target.add_at_frame(child, &self.placement)
    }
}

impl Maker {
    /// Build a shape spanning two anchors of this Maker and add it.
    ///
    /// # Errors
    ///
    /// As for [`AddBetween::apply`].
    pub fn add_between(
        &mut self,
        between: &AddBetween,
        lazy: &LazyNamedShape,
    ) -> MakerResult<&mut Self> {
        let solved = between.solve(&*self, lazy)?;
        solved.attach(self, lazy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{AnchorArgs, AnchorDef, AnchorTable};
    use crate::lazy::LazyShape;
    use crate::shape::ShapeExt;
    use approx::assert_relative_eq;
    use solid_types::{AnchorPath, ShapeName, anchor_path};

    /// Fixed targets: `a` at the origin, `b` at (10, 0, 0), `c` also at the origin.
    #[derive(Debug)]
    struct Targets;

    fn origin(_: &Targets, _: &AnchorArgs<'_>) -> MakerResult<Frame> {
        Ok(Frame::identity())
    }

    fn ten_along_x(_: &Targets, _: &AnchorArgs<'_>) -> MakerResult<Frame> {
        Ok(Frame::translation(10.0, 0.0, 0.0))
    }

    static TARGET_ANCHORS: AnchorTable<Targets> = AnchorTable::new(
        "Targets",
        &[
            AnchorDef::new("a", "Origin.", origin),
            AnchorDef::new("b", "Ten along X.", ten_along_x),
            AnchorDef::new("c", "Origin again.", origin),
        ],
    );

    impl Shape for Targets {
        fn type_name(&self) -> &str {
            "Targets"
        }

        fn anchor(&self, path: &AnchorPath) -> MakerResult<Frame> {
            TARGET_ANCHORS.resolve(self, path)
        }

        fn anchor_names(&self) -> Vec<String> {
            TARGET_ANCHORS.names().into_iter().map(String::from).collect()
        }
    }

    #[derive(Debug)]
    struct Rod {
        len: f64,
    }

    fn rod_base(_: &Rod, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
        args.expect(&[])?;
        Ok(Frame::identity())
    }

    fn rod_top(rod: &Rod, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
        args.expect(&[])?;
        Ok(Frame::translation(0.0, 0.0, rod.len))
    }

    static ROD_ANCHORS: AnchorTable<Rod> = AnchorTable::new(
        "Rod",
        &[
            AnchorDef::new("base", "Bottom end.", rod_base),
            AnchorDef::new("top", "Top end.", rod_top),
        ],
    );

    impl Shape for Rod {
        fn type_name(&self) -> &str {
            "Rod"
        }

        fn anchor(&self, path: &AnchorPath) -> MakerResult<Frame> {
            ROD_ANCHORS.resolve(self, path)
        }

        fn anchor_names(&self) -> Vec<String> {
            ROD_ANCHORS.names().into_iter().map(String::from).collect()
        }
    }

    fn rod() -> LazyNamedShape {
        LazyShape::new(|len| Ok(Rod { len })).solid("rod")
    }

    fn between(from: &str, to: &str) -> AddBetween {
        AddBetween::new(
            anchor_path!(from),
            anchor_path!(to),
            anchor_path!("base"),
            anchor_path!("top"),
        )
    }

    #[test]
    fn test_length_and_translation() {
        let solved = between("a", "b").solve(&Targets, &rod()).unwrap();
        assert_relative_eq!(solved.length(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(
            solved.placement().translation_vector(),
            Vector3::new(10.0, 0.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ends_land_on_targets() {
        let mut maker = Targets.cage("targets").at_origin();
        maker.add_between(&between("a", "b"), &rod()).unwrap();

        let base = maker.anchor(&anchor_path!("rod", "base")).unwrap();
        let top = maker.anchor(&anchor_path!("rod", "top")).unwrap();
        assert_relative_eq!(
            base.translation_vector(),
            Vector3::new(10.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(top.translation_vector(), Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn test_swapped_targets_mirror() {
        let mut maker = Targets.cage("targets").at_origin();
        maker.add_between(&between("b", "a"), &rod()).unwrap();

        let base = maker.anchor(&anchor_path!("rod", "base")).unwrap();
        let top = maker.anchor(&anchor_path!("rod", "top")).unwrap();
        assert_relative_eq!(base.translation_vector(), Vector3::zeros(), epsilon = 1e-12);
        assert_relative_eq!(
            top.translation_vector(),
            Vector3::new(10.0, 0.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_coincident_targets_fail() {
        let result = between("a", "c").solve(&Targets, &rod());
        assert!(matches!(
            result,
            Err(MakerError::Degenerate(FrameError::ZeroLengthVector { .. }))
        ));
    }

    #[test]
    fn test_twist_brings_axis_into_plane() {
        let twisted = between("a", "b")
            .with_alignment(Vector3::x(), Vector3::z())
            .solve(&Targets, &rod())
            .unwrap();
        let x = twisted.placement().axis(0);
        assert_relative_eq!(x.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(x.y.abs(), 1.0, epsilon = 1e-9);
        // The rod still runs from b back to a.
        assert_relative_eq!(
            twisted.placement().axis(2),
            Vector3::new(-1.0, 0.0, 0.0),
            epsilon = 1e-9
        );

        let plain = between("a", "b")
            .without_alignment()
            .solve(&Targets, &rod())
            .unwrap();
        assert_relative_eq!(plain.placement().axis(0).z.abs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shape_add_at_offsets_attachment() {
        let solved = between("a", "b")
            .with_shape_add_at(AtSpec::new(anchor_path!("base")).with_post(Frame::translation(
                0.0, 0.0, 2.0,
            )))
            .solve(&Targets, &rod())
            .unwrap();
        assert_relative_eq!(
            solved.add_at().translation_vector(),
            Vector3::new(0.0, 0.0, 2.0),
            epsilon = 1e-12
        );

        let mut maker = Targets.cage("targets").at_origin();
        between("a", "b")
            .with_shape_add_at(AtSpec::new(anchor_path!("base")).with_post(Frame::translation(
                0.0, 0.0, 2.0,
            )))
            .apply(&Targets, &mut maker, &rod())
            .unwrap();
        let entry = maker.entry(&ShapeName::from("rod")).unwrap();
        // The point two units up the rod sits on target b.
        let p = entry.frame().apply_point(&solid_types::Point3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(p.coords, Vector3::new(10.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_factory_error_propagates() {
        let failing = LazyShape::new(|_| -> MakerResult<Rod> {
            Err(MakerError::InvalidParameter {
                shape: "Rod".into(),
                reason: "no".into(),
            })
        })
        .solid("rod");
        assert!(matches!(
            between("a", "b").solve(&Targets, &failing),
            Err(MakerError::InvalidParameter { .. })
        ));
    }
}
