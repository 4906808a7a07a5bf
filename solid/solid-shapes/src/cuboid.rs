//! Rectangular boxes.

use solid_csg::{CsgNode, Primitive};
use solid_maker::{
    AnchorArgs, AnchorDef, AnchorTable, MakerError, MakerResult, RenderResult, Renderer, Shape,
};
use solid_types::{AnchorPath, Frame, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::example::{ExampleAnchor, HasExample};

/// A face of a [`Cuboid`].
///
/// Faces are numbered 0-5 and also have names. Each face anchor points its
/// Z axis out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Face {
    /// Face 0, the `y = 0` side.
    Front,
    /// Face 1, the `z = 0` side.
    Base,
    /// Face 2, the `x = 0` side.
    Left,
    /// Face 3, the `y = size.y` side.
    Back,
    /// Face 4, the `z = size.z` side.
    Top,
    /// Face 5, the `x = size.x` side.
    Right,
}

impl Face {
    /// All faces in index order.
    pub const ALL: [Self; 6] = [
        Self::Front,
        Self::Base,
        Self::Left,
        Self::Back,
        Self::Top,
        Self::Right,
    ];

    /// Face number.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Front => 0,
            Self::Base => 1,
            Self::Left => 2,
            Self::Back => 3,
            Self::Top => 4,
            Self::Right => 5,
        }
    }

    /// Face by number.
    #[must_use]
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Face by name (`front`, `back`, `base`, `top`, `left`, `right`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "front" => Some(Self::Front),
            "base" => Some(Self::Base),
            "left" => Some(Self::Left),
            "back" => Some(Self::Back),
            "top" => Some(Self::Top),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Rotation taking +Z to the face's outward normal.
    fn orientation(self) -> Frame {
        match self {
            Self::Front => Frame::rotation_x(90.0),
            Self::Base => Frame::rotation_x(180.0),
            Self::Left => Frame::rotation_x(90.0) * Frame::rotation_y(-90.0),
            Self::Back => Frame::rotation_x(270.0),
            Self::Top => Frame::identity(),
            Self::Right => Frame::rotation_x(90.0) * Frame::rotation_y(90.0),
        }
    }
}

/// Corners of each face as bitsets of the axes at full size, in edge order.
const CORNERS: [[u8; 4]; 6] = [
    [0b000, 0b001, 0b101, 0b100],
    [0b010, 0b011, 0b001, 0b000],
    [0b010, 0b000, 0b100, 0b110],
    [0b110, 0b111, 0b011, 0b010],
    [0b100, 0b101, 0b111, 0b110],
    [0b001, 0b011, 0b111, 0b101],
];

/// Axis normal to faces `i` and `i + 3`.
const NORMAL_AXIS: [usize; 3] = [1, 2, 0];

/// A box with one corner at the origin and the opposite corner at `size`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cuboid {
    size: Vector3<f64>,
}

impl Cuboid {
    /// A box of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::InvalidParameter`] if any dimension is negative
    /// or not finite.
    pub fn new(size: impl Into<Vector3<f64>>) -> MakerResult<Self> {
        let size = size.into();
        if size.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(MakerError::InvalidParameter {
                shape: "Cuboid".into(),
                reason: format!(
                    "size ({}, {}, {}) must be finite and non-negative",
                    size.x, size.y, size.z
                ),
            });
        }
        Ok(Self { size })
    }

    /// A cube with side `side`.
    ///
    /// # Errors
    ///
    /// As for [`new`](Self::new).
    pub fn cube(side: f64) -> MakerResult<Self> {
        Self::new(Vector3::new(side, side, side))
    }

    /// Box dimensions.
    #[must_use]
    pub const fn size(&self) -> &Vector3<f64> {
        &self.size
    }

    /// Centre of the box, oriented like the world.
    #[must_use]
    pub fn centre(&self) -> Frame {
        Frame::from_translation(self.size / 2.0)
    }

    /// Point on edge `edge` (taken modulo 4) of `face`.
    ///
    /// `t` runs along the edge from its first corner (0) to its second (1)
    /// and extrapolates beyond; `d` is an absolute offset along the edge.
    /// The frame's Z axis points out of the face and its X axis along the edge.
    #[must_use]
    pub fn face_edge(&self, face: Face, edge: usize, t: f64, d: f64) -> Frame {
        let edge = edge % 4;
        let f = face.index();
        let corner = CORNERS[f][edge];
        let half = corner ^ CORNERS[f][(edge + 1) % 4];
        let zero = !corner & 0b111;

        let mut loc = self.size;
        for i in 0..3 {
            let bit = 1 << i;
            if half & bit != 0 {
                loc[i] = if zero & bit != 0 {
                    t.mul_add(loc[i], d)
                } else {
                    (1.0 - t).mul_add(loc[i], -d)
                };
            } else if zero & bit != 0 {
                loc[i] = 0.0;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let turn = 90.0 * edge as f64;
        Frame::from_translation(loc) * face.orientation() * Frame::rotation_z(turn)
    }

    /// Corner `corner` (taken modulo 4) of `face`, oriented like the edge starting there.
    #[must_use]
    pub fn face_corner(&self, face: Face, corner: usize) -> Frame {
        self.face_edge(face, corner, 0.0, 0.0)
    }

    /// Centre of `face`.
    #[must_use]
    pub fn face_centre(&self, face: Face) -> Frame {
        let f = face.index();
        let keep = NORMAL_AXIS[f % 3];
        let mut loc = self.size / 2.0;
        loc[keep] = if f < 3 { 0.0 } else { self.size[keep] };
        Frame::from_translation(loc) * face.orientation()
    }
}

fn face_arg(args: &AnchorArgs<'_>) -> MakerResult<Face> {
    let arg = args
        .arg(0, "face")
        .ok_or_else(|| args.error("missing argument 'face'"))?;
    if let Some(index) = arg.as_int() {
        return Face::from_index(index)
            .ok_or_else(|| args.error(format!("face {index} is not in 0-5")));
    }
    if let Some(name) = arg.as_str() {
        return Face::from_name(name).ok_or_else(|| args.error(format!("unknown face '{name}'")));
    }
    Err(args.type_error("face", "a face number or name", arg))
}

fn edge_arg(args: &AnchorArgs<'_>, name: &str) -> MakerResult<usize> {
    let edge = args.int(1, name)?;
    usize::try_from(edge)
        .ok()
        .filter(|e| *e < 4)
        .ok_or_else(|| args.error(format!("{name} {edge} is not in 0-3")))
}

fn centre(cuboid: &Cuboid, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&[])?;
    Ok(cuboid.centre())
}

fn face_corner(cuboid: &Cuboid, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&["face", "corner", "t", "d"])?;
    let face = face_arg(args)?;
    let corner = edge_arg(args, "corner")?;
    let t = args.f64(2, "t", 0.0)?;
    let d = args.f64(3, "d", 0.0)?;
    Ok(cuboid.face_edge(face, corner, t, d))
}

fn face_edge(cuboid: &Cuboid, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&["face", "edge", "t", "d"])?;
    let face = face_arg(args)?;
    let edge = edge_arg(args, "edge")?;
    let t = args.f64(2, "t", 0.5)?;
    let d = args.f64(3, "d", 0.0)?;
    Ok(cuboid.face_edge(face, edge, t, d))
}

fn face_centre(cuboid: &Cuboid, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
    args.expect(&["face"])?;
    Ok(cuboid.face_centre(face_arg(args)?))
}

static CUBOID_ANCHORS: AnchorTable<Cuboid> = AnchorTable::new(
    "Cuboid",
    &[
        AnchorDef::new("centre", "Centre of box oriented same as face 4.", centre),
        AnchorDef::new(
            "face_corner",
            "Corner of box given face (0-5) and corner (0-3).",
            face_corner,
        ),
        AnchorDef::new(
            "face_edge",
            "Edge point of box given face (0-5), edge (0-3) and t (default 0.5).",
            face_edge,
        ),
        AnchorDef::new("face_centre", "Centre of face given face (0-5).", face_centre),
    ],
);

impl Shape for Cuboid {
    fn type_name(&self) -> &str {
        CUBOID_ANCHORS.shape()
    }

    fn anchor(&self, path: &AnchorPath) -> MakerResult<Frame> {
        CUBOID_ANCHORS.resolve(self, path)
    }

    fn anchor_names(&self) -> Vec<String> {
        CUBOID_ANCHORS.names().into_iter().map(String::from).collect()
    }

    fn has_anchor(&self, name: &str) -> bool {
        CUBOID_ANCHORS.contains(name)
    }

    fn render(&self, renderer: &mut Renderer) -> RenderResult<()> {
        renderer.add(CsgNode::primitive(
            Primitive::new("cube").with_param("size", self.size),
        ))
    }
}

impl HasExample for Cuboid {
    fn example_shape() -> MakerResult<Self> {
        Self::new(Vector3::new(100.0, 120.0, 140.0))
    }

    fn example_anchors() -> Vec<ExampleAnchor> {
        let mut anchors = Vec::new();
        for face in [0, 3] {
            for corner in 0..4 {
                anchors.push(ExampleAnchor::surface(
                    AnchorPath::named("face_corner").arg(face).arg(corner),
                ));
            }
        }
        for face in [1, 3] {
            for edge in 0..4 {
                anchors.push(ExampleAnchor::surface(
                    AnchorPath::named("face_edge").arg(face).arg(edge),
                ));
            }
        }
        for face in ["front", "back", "left", "right", "base", "top"] {
            anchors.push(ExampleAnchor::surface(
                AnchorPath::named("face_centre").arg(face),
            ));
        }
        anchors.push(ExampleAnchor::surface(
            AnchorPath::named("face_edge").arg(2).arg(2).arg(0.1),
        ));
        anchors.push(ExampleAnchor::surface(
            AnchorPath::named("face_edge").arg("left").arg(2).arg(-0.5),
        ));
        anchors.push(ExampleAnchor::inner(AnchorPath::named("centre")));
        anchors
    }
}
