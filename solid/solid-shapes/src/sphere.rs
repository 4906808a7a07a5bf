//! Spheres.

use solid_csg::{CsgNode, Primitive};
use solid_maker::{
    AnchorArgs, AnchorDef, AnchorTable, MakerError, MakerResult, RenderResult, Renderer, Shape,
};
use solid_types::{AnchorPath, Frame, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::example::{ExampleAnchor, HasExample};
use crate::resolution::Resolution;

/// Rotation of 120 degrees about (1, 1, 1), taking X to Y, Y to Z and Z to X.
pub(crate) fn rot_111_120() -> Frame {
    Frame::rotation_z(90.0) * Frame::rotation_x(90.0)
}

/// A sphere centred on the origin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sphere {
    r: f64,
    resolution: Resolution,
}

impl Sphere {
    /// A sphere of radius `r`.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::InvalidParameter`] if `r` is negative or not finite.
    pub fn new(r: f64) -> MakerResult<Self> {
        if !r.is_finite() || r < 0.0 {
            return Err(MakerError::InvalidParameter {
                shape: "Sphere".into(),
                reason: format!("radius {r} must be finite and non-negative"),
            });
        }
        Ok(Self {
            r,
            resolution: Resolution::default(),
        })
    }

    /// Override the tessellation settings.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Radius.
    #[must_use]
    pub const fn r(&self) -> f64 {
        self.r
    }

    /// Tessellation overrides.
    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Point on the surface given rotations about Z, then X, then Y, in degrees.
    ///
    /// The zero point is on the +X axis. The frame's Z axis points out of
    /// the sphere.
    #[must_use]
    pub fn surface(&self, degrees: Vector3<f64>) -> Frame {
        Frame::rotation_y(degrees.z)
            * Frame::rotation_x(degrees.y)
            * Frame::rotation_z(degrees.x)
            * Frame::translation(self.r, 0.0, 0.0)
            * rot_111_120()
    }
}

fn base(sphere: &Sphere, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&[])?;
    Ok(Frame::rotation_x(180.0) * Frame::translation(0.0, 0.0, sphere.r))
}

fn top(sphere: &Sphere, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&[])?;
    Ok(Frame::translation(0.0, 0.0, sphere.r))
}

fn centre(_: &Sphere, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&[])?;
    Ok(Frame::rotation_x(180.0))
}

fn surface(sphere: &Sphere, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&["degrees", "radians"])?;
    let degrees = match args.opt_vector(1, "radians")? {
        Some(radians) => radians.map(f64::to_degrees),
        None => args.opt_vector(0, "degrees")?.unwrap_or_else(Vector3::zeros),
    };
    Ok(sphere.surface(degrees))
}

static SPHERE_ANCHORS: AnchorTable<Sphere> = AnchorTable::new(
    "Sphere",
    &[
        AnchorDef::new("base", "The base of the sphere.", base),
        AnchorDef::new("top", "The top of the sphere.", top),
        AnchorDef::new("centre", "The centre of the sphere.", centre),
        AnchorDef::new("surface", "A location on the sphere.", surface),
    ],
);

impl Shape for Sphere {
    fn type_name(&self) -> &str {
        SPHERE_ANCHORS.shape()
    }

    fn anchor(&self, path: &AnchorPath) -> MakerResult<Frame> {
        SPHERE_ANCHORS.resolve(self, path)
    }

    fn anchor_names(&self) -> Vec<String> {
        SPHERE_ANCHORS.names().into_iter().map(String::from).collect()
    }

    fn has_anchor(&self, name: &str) -> bool {
        SPHERE_ANCHORS.contains(name)
    }

    fn render(&self, renderer: &mut Renderer) -> RenderResult<()> {
        let sphere = Primitive::new("sphere").with_param("r", self.r);
        let sphere = self.resolution.apply(sphere, &renderer.current_attributes());
        renderer.add(CsgNode::primitive(sphere))
    }
}

impl HasExample for Sphere {
    fn example_shape() -> MakerResult<Self> {
        Self::new(20.0)
    }

    fn example_anchors() -> Vec<ExampleAnchor> {
        vec![
            ExampleAnchor::surface(AnchorPath::named("top")),
            ExampleAnchor::surface(AnchorPath::named("base")),
            ExampleAnchor::inner(AnchorPath::named("centre")),
            ExampleAnchor::surface(AnchorPath::named("surface").arg([90.0, 30.0, 45.0])),
            ExampleAnchor::surface(AnchorPath::named("surface").arg([-45.0, 0.0, 0.0])),
            ExampleAnchor::surface(AnchorPath::named("surface").arg([0.0, 0.0, 0.0])),
        ]
    }
}
