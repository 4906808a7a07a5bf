//! Cones, conical frustums and cylinders.

use solid_csg::{CsgNode, Primitive};
use solid_maker::{
    AnchorArgs, AnchorDef, AnchorTable, MakerError, MakerResult, RenderResult, Renderer, Shape,
};
use solid_types::{AnchorPath, Frame, Vector3, rotation_to_align};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::example::{ExampleAnchor, HasExample};
use crate::resolution::Resolution;
use crate::sphere::rot_111_120;

/// A cone standing on the XY plane with its axis along +Z.
///
/// Either radius may be zero. Equal radii make a cylinder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cone {
    h: f64,
    r_base: f64,
    r_top: f64,
    resolution: Resolution,
}

impl Cone {
    /// A cone of height `h` with base radius `r_base` and top radius `r_top`.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::InvalidParameter`] if any dimension is negative
    /// or not finite.
    pub fn new(h: f64, r_base: f64, r_top: f64) -> MakerResult<Self> {
        for (name, value) in [("h", h), ("r_base", r_base), ("r_top", r_top)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MakerError::InvalidParameter {
                    shape: "Cone".into(),
                    reason: format!("parameter {name}({value}) must be finite and non-negative"),
                });
            }
        }
        Ok(Self {
            h,
            r_base,
            r_top,
            resolution: Resolution::default(),
        })
    }

    /// A cylinder of height `h` and radius `r`.
    ///
    /// # Errors
    ///
    /// As for [`new`](Self::new).
    pub fn cylinder(h: f64, r: f64) -> MakerResult<Self> {
        Self::new(h, r, r)
    }

    /// Override the tessellation settings.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Height.
    #[must_use]
    pub const fn h(&self) -> f64 {
        self.h
    }

    /// Radius at `z = 0`.
    #[must_use]
    pub const fn r_base(&self) -> f64 {
        self.r_base
    }

    /// Radius at `z = h`.
    #[must_use]
    pub const fn r_top(&self) -> f64 {
        self.r_top
    }

    /// Whether both radii are equal.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_cylinder(&self) -> bool {
        self.r_base == self.r_top
    }

    /// Radius at height `z`, extrapolated linearly outside `0..=h`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn radius_at(&self, z: f64) -> f64 {
        let ratio = if self.h == 0.0 { 0.0 } else { z / self.h };
        ratio.mul_add(self.r_top, (1.0 - ratio) * self.r_base)
    }

    /// Point on the curved surface at height `h`, turned `degrees` about Z
    /// from the +X axis.
    ///
    /// With `tangent` the frame's Z axis is the outward surface normal and its
    /// X axis runs around the cone; otherwise Z points straight out from the axis.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::Degenerate`] for a tangent frame on a cone with
    /// no height and equal radii.
    pub fn surface(
        &self,
        h: f64,
        degrees: f64,
        tangent: bool,
        radius_delta: f64,
    ) -> MakerResult<Frame> {
        let x = self.radius_at(h) + radius_delta;
        let orient = if tangent {
            let slope = Vector3::new(self.r_top - self.r_base, 0.0, self.h);
            rotation_to_align(-Vector3::x(), slope)? * Frame::rotation_z(90.0)
        } else {
            rot_111_120()
        };
        Ok(Frame::rotation_z(degrees) * Frame::translation(x, 0.0, h) * orient)
    }
}

/// Height parameter `h` offset by `rh` fractions of the cone's height.
fn height(cone: &Cone, args: &AnchorArgs<'_>, index: usize) -> MakerResult<f64> {
    let h = args.f64(index, "h", 0.0)?;
    let rh = args.opt_f64(index + 1, "rh")?.unwrap_or(0.0);
    Ok(rh.mul_add(cone.h, h))
}

fn base(cone: &Cone, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&["h", "rh"])?;
    let h = height(cone, args, 0)?;
    Ok(Frame::translation(0.0, 0.0, h) * Frame::rotation_x(180.0))
}

fn top(cone: &Cone, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&["h", "rh"])?;
    let h = height(cone, args, 0)?;
    Ok(Frame::translation(0.0, 0.0, cone.h - h))
}

fn centre(cone: &Cone, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&[])?;
    Ok(Frame::translation(0.0, 0.0, cone.h / 2.0) * Frame::rotation_x(180.0))
}

fn surface(cone: &Cone, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&["h", "degrees", "radians", "tangent", "rh", "radius_delta"])?;
    let mut h = args.f64(0, "h", 0.0)?;
    if let Some(rh) = args.opt_f64(4, "rh")? {
        h = rh.mul_add(cone.h, h);
    }
    let degrees = match args.opt_f64(2, "radians")? {
        Some(radians) => radians.to_degrees(),
        None => args.f64(1, "degrees", 0.0)?,
    };
    let tangent = args.bool(3, "tangent", true)?;
    let radius_delta = args.f64(5, "radius_delta", 0.0)?;
    cone.surface(h, degrees, tangent, radius_delta)
}

static CONE_ANCHORS: AnchorTable<Cone> = AnchorTable::new(
    "Cone",
    &[
        AnchorDef::new("base", "The base of the cone.", base),
        AnchorDef::new("top", "The top of the cone.", top),
        AnchorDef::new("centre", "The centre of the cone.", centre),
        AnchorDef::new("surface", "A location on the curved surface.", surface),
    ],
);

impl Shape for Cone {
    fn type_name(&self) -> &str {
        CONE_ANCHORS.shape()
    }

    fn anchor(&self, path: &AnchorPath) -> MakerResult<Frame> {
        CONE_ANCHORS.resolve(self, path)
    }

    fn anchor_names(&self) -> Vec<String> {
        CONE_ANCHORS.names().into_iter().map(String::from).collect()
    }

    fn has_anchor(&self, name: &str) -> bool {
        CONE_ANCHORS.contains(name)
    }

    fn render(&self, renderer: &mut Renderer) -> RenderResult<()> {
        let cylinder = Primitive::new("cylinder")
            .with_param("h", self.h)
            .with_param("r1", self.r_base)
            .with_param("r2", self.r_top)
            .with_param("center", false);
        let cylinder = self
            .resolution
            .apply(cylinder, &renderer.current_attributes());
        renderer.add(CsgNode::primitive(cylinder))
    }
}

impl HasExample for Cone {
    fn example_shape() -> MakerResult<Self> {
        Ok(Self::new(50.0, 30.0, 5.0)?.with_resolution(Resolution {
            segments: Some(30),
            ..Resolution::default()
        }))
    }

    fn example_anchors() -> Vec<ExampleAnchor> {
        vec![
            ExampleAnchor::surface(AnchorPath::named("base")),
            ExampleAnchor::surface(AnchorPath::named("top")),
            ExampleAnchor::surface(AnchorPath::named("surface").arg(20.0).arg(0.0)),
            ExampleAnchor::surface(AnchorPath::named("surface").arg(10.0).arg(45.0)),
            ExampleAnchor::surface(
                AnchorPath::named("surface")
                    .arg(3.0)
                    .arg(90.0)
                    .with("tangent", false),
            ),
            ExampleAnchor::inner(AnchorPath::named("centre")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use solid_csg::ParamValue;
    use solid_maker::{ShapeExt, render};
    use solid_types::anchor_path;

    #[test]
    fn test_negative_parameters_rejected() {
        assert!(Cone::new(-1.0, 1.0, 1.0).is_err());
        assert!(Cone::new(1.0, -1.0, 1.0).is_err());
        let err = Cone::new(1.0, 1.0, -2.0).unwrap_err();
        assert!(err.to_string().contains("r_top"));
    }

    #[test]
    fn test_cylinder_constructor() {
        let c = Cone::cylinder(4.0, 1.5).unwrap();
        assert!(c.is_cylinder());
        assert_relative_eq!(c.radius_at(3.0), 1.5);
    }

    #[test]
    fn test_base_and_top() {
        let c = Cone::new(10.0, 3.0, 1.0).unwrap();
        assert_eq!(c.anchor(&anchor_path!("base")).unwrap(), Frame::rotation_x(180.0));
        assert_eq!(
            c.anchor(&anchor_path!("top")).unwrap(),
            Frame::translation(0.0, 0.0, 10.0)
        );
        let raised = c.anchor(&anchor_path!("base", 2.0; rh = 0.5)).unwrap();
        assert_relative_eq!(raised.translation_vector(), Vector3::new(0.0, 0.0, 7.0));
        let lowered = c.anchor(&anchor_path!("top"; rh = 0.25)).unwrap();
        assert_relative_eq!(lowered.translation_vector(), Vector3::new(0.0, 0.0, 7.5));
    }

    #[test]
    fn test_centre_faces_down() {
        let c = Cone::new(8.0, 1.0, 1.0).unwrap();
        let f = c.anchor(&anchor_path!("centre")).unwrap();
        assert_relative_eq!(f.translation_vector(), Vector3::new(0.0, 0.0, 4.0));
        assert_relative_eq!(f.axis(2), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_cylinder_surface_normal_is_radial() {
        let c = Cone::cylinder(10.0, 2.0).unwrap();
        let f = c.anchor(&anchor_path!("surface", 5.0, 90.0)).unwrap();
        assert_relative_eq!(f.translation_vector(), Vector3::new(0.0, 2.0, 5.0), epsilon = 1e-12);
        assert_relative_eq!(f.axis(2), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_cone_surface_normal_is_perpendicular_to_slope() {
        let c = Cone::new(50.0, 30.0, 5.0).unwrap();
        let f = c.anchor(&anchor_path!("surface", 20.0, 0.0)).unwrap();
        assert_relative_eq!(f.translation_vector(), Vector3::new(20.0, 0.0, 20.0), epsilon = 1e-9);
        let slope = Vector3::new(-25.0, 0.0, 50.0);
        assert_relative_eq!(f.axis(2).dot(&slope), 0.0, epsilon = 1e-9);
        assert!(f.axis(2).x > 0.0);
    }

    #[test]
    fn test_non_tangent_surface() {
        let c = Cone::new(50.0, 30.0, 5.0).unwrap();
        let f = c
            .anchor(&anchor_path!("surface", 0.0, 0.0; tangent = false))
            .unwrap();
        assert_relative_eq!(f.axis(2), Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_surface_radians_and_delta() {
        let c = Cone::cylinder(10.0, 2.0).unwrap();
        let f = c
            .anchor(&anchor_path!("surface"; radians = std::f64::consts::PI, radius_delta = 1.0))
            .unwrap();
        assert_relative_eq!(f.translation_vector(), Vector3::new(-3.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_flat_disc_radius_is_base_radius() {
        let disc = Cone::new(0.0, 2.0, 1.0).unwrap();
        assert_relative_eq!(disc.radius_at(0.0), 2.0);
        assert_relative_eq!(disc.radius_at(5.0), 2.0);
    }

    #[test]
    fn test_flat_disc_tangent_is_degenerate() {
        let c = Cone::new(0.0, 1.0, 1.0).unwrap();
        assert!(matches!(
            c.anchor(&anchor_path!("surface")),
            Err(MakerError::Degenerate(_))
        ));
    }

    #[test]
    fn test_render_cylinder_params() {
        let c = Cone::new(4.0, 2.0, 1.0).unwrap();
        let out = render(&c.solid("c").at_origin()).unwrap();
        let prims = out.csg.primitives();
        assert_eq!(prims[0].kind, "cylinder");
        assert_eq!(prims[0].param("r1"), Some(&ParamValue::Number(2.0)));
        assert_eq!(prims[0].param("r2"), Some(&ParamValue::Number(1.0)));
        assert_eq!(prims[0].param("center"), Some(&ParamValue::Bool(false)));
    }
}
