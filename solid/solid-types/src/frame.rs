//! Affine reference frames.
//!
//! A [`Frame`] is a 4x4 homogeneous transform whose last row is always
//! `[0, 0, 0, 1]`. Frames are the currency of anchoring: every anchor of every
//! shape resolves to one, and composing frames along a path locates a feature
//! of a nested shape in the coordinates of its outermost container.

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};
use std::f64::consts::{FRAC_PI_2, PI};
use std::ops::Mul;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Default tolerance for approximate frame comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Trig results smaller than this are snapped to zero so quarter turns are exact.
const CLEAN_EPSILON: f64 = 1e-13;

/// Below this sine two directions are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Below this determinant the linear block is treated as singular.
const SINGULAR_EPSILON: f64 = 1e-15;

fn clean(v: f64) -> f64 {
    if v.abs() < CLEAN_EPSILON { 0.0 } else { v }
}

fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (clean(radians.sin()), clean(radians.cos()))
}

/// An immutable affine transform.
///
/// Composition follows matrix multiplication: `a * b` applies `b` first and
/// then `a`. This ordering is used consistently by anchor resolution, so the
/// frame of a feature of a child shape is always `parent_frame * child_anchor`.
///
/// # Example
///
/// ```
/// use solid_types::Frame;
/// use nalgebra::Point3;
///
/// let frame = Frame::translation(1.0, 2.0, 3.0) * Frame::uniform_scale(2.0);
/// let p = frame.apply_point(&Point3::new(1.0, 1.0, 1.0));
/// assert_eq!(p, Point3::new(3.0, 4.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    matrix: Matrix4<f64>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

impl Frame {
    /// Create a frame from a 4x4 matrix.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::NotAffine`] if the last row is not `[0, 0, 0, 1]`.
    pub fn from_matrix(matrix: Matrix4<f64>) -> FrameResult<Self> {
        let row = [
            matrix[(3, 0)],
            matrix[(3, 1)],
            matrix[(3, 2)],
            matrix[(3, 3)],
        ];
        #[allow(clippy::float_cmp)]
        // Exact: the affine invariant is structural, not approximate.
        if row != [0.0, 0.0, 0.0, 1.0] {
            return Err(FrameError::NotAffine { row });
        }
        Ok(Self { matrix })
    }

    /// The identity frame.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation.
    #[must_use]
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            matrix: Matrix4::new_translation(&Vector3::new(tx, ty, tz)),
        }
    }

    /// Create a translation from a vector.
    #[must_use]
    pub fn from_translation(v: Vector3<f64>) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    /// Create a non-uniform scale.
    #[must_use]
    pub fn scale(v: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&v),
        }
    }

    /// Create a uniform scale.
    #[must_use]
    pub fn uniform_scale(factor: f64) -> Self {
        Self::scale(Vector3::new(factor, factor, factor))
    }

    /// Create a rotation about the X axis.
    ///
    /// # Arguments
    ///
    /// * `degrees` - Rotation angle in degrees
    #[must_use]
    pub fn rotation_x(degrees: f64) -> Self {
        let (s, c) = sin_cos_degrees(degrees);
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0,   c,  -s, 0.0,
            0.0,   s,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// Create a rotation about the Y axis.
    ///
    /// # Arguments
    ///
    /// * `degrees` - Rotation angle in degrees
    #[must_use]
    pub fn rotation_y(degrees: f64) -> Self {
        let (s, c) = sin_cos_degrees(degrees);
        #[rustfmt::skip]
        let matrix = Matrix4::new(
              c, 0.0,   s, 0.0,
            0.0, 1.0, 0.0, 0.0,
             -s, 0.0,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// Create a rotation about the Z axis.
    ///
    /// # Arguments
    ///
    /// * `degrees` - Rotation angle in degrees
    #[must_use]
    pub fn rotation_z(degrees: f64) -> Self {
        let (s, c) = sin_cos_degrees(degrees);
        #[rustfmt::skip]
        let matrix = Matrix4::new(
              c,  -s, 0.0, 0.0,
              s,   c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// Create a rotation about an arbitrary axis.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ZeroLengthVector`] if `axis` has zero length.
    pub fn rotation_axis(axis: Vector3<f64>, degrees: f64) -> FrameResult<Self> {
        let unit = normalize(axis, "rotation_axis")?;
        let (s, c) = sin_cos_degrees(degrees);
        Ok(Self::rotation_unit_sin_cos(&unit, s, c))
    }

    /// Rodrigues rotation about a unit axis given the sine and cosine of the angle.
    #[allow(clippy::many_single_char_names)]
    // Single-char names: standard mathematical notation for rotation formula
    #[allow(clippy::suboptimal_flops)]
    fn rotation_unit_sin_cos(axis: &Vector3<f64>, s: f64, c: f64) -> Self {
        let t = 1.0 - c;
        let x = axis.x;
        let y = axis.y;
        let z = axis.z;

        #[rustfmt::skip]
        let matrix = Matrix4::new(
            t*x*x + c,     t*x*y - s*z,   t*x*z + s*y,   0.0,
            t*x*y + s*z,   t*y*y + c,     t*y*z - s*x,   0.0,
            t*x*z - s*y,   t*y*z + s*x,   t*z*z + c,     0.0,
            0.0,           0.0,           0.0,           1.0,
        );
        Self { matrix }
    }

    /// Create a reflection through the plane (containing the origin) with the given normal.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ZeroLengthVector`] if `normal` has zero length.
    pub fn mirror(normal: Vector3<f64>) -> FrameResult<Self> {
        let n = normalize(normal, "mirror")?;
        let linear = Matrix3::identity() - 2.0 * n * n.transpose();
        Ok(Self::from_linear_and_translation(&linear, &Vector3::zeros()))
    }

    fn from_linear_and_translation(linear: &Matrix3<f64>, t: &Vector3<f64>) -> Self {
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(linear);
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(t);
        Self { matrix }
    }

    /// Get the underlying 4x4 matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Compose two frames: the result applies `other` first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Compute the inverse frame.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::SingularMatrix`] if the upper 3x3 block is singular.
    pub fn inverse(&self) -> FrameResult<Self> {
        let linear = self.linear();
        if linear.determinant().abs() < SINGULAR_EPSILON {
            return Err(FrameError::SingularMatrix);
        }
        let inv = linear.try_inverse().ok_or(FrameError::SingularMatrix)?;
        let t = -(inv * self.translation_vector());
        Ok(Self::from_linear_and_translation(&inv, &t))
    }

    /// Transform a point (w = 1, translation applies).
    #[must_use]
    pub fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let r = self.matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(r.x, r.y, r.z)
    }

    /// Transform a direction (w = 0, translation ignored).
    #[must_use]
    pub fn apply_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.linear() * vector
    }

    /// The upper 3x3 block.
    #[must_use]
    pub fn linear(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// The translation component.
    #[must_use]
    pub fn translation_vector(&self) -> Vector3<f64> {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// The point this frame places the origin at.
    #[must_use]
    pub fn origin(&self) -> Point3<f64> {
        Point3::from(self.translation_vector())
    }

    /// This frame with its translation removed.
    #[must_use]
    pub fn rotation(&self) -> Self {
        Self::from_linear_and_translation(&self.linear(), &Vector3::zeros())
    }

    /// Column `index` (0 = X, 1 = Y, 2 = Z) of the linear block.
    ///
    /// Indices above 2 are clamped to the Z axis.
    #[must_use]
    pub fn axis(&self, index: usize) -> Vector3<f64> {
        self.matrix.fixed_view::<3, 1>(0, index.min(2)).into_owned()
    }

    /// Exact identity check.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix4::identity()
    }

    /// Element-wise comparison within `tolerance`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Mul for Frame {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

impl Mul<&Frame> for &Frame {
    type Output = Frame;

    fn mul(self, rhs: &Frame) -> Frame {
        self.compose(rhs)
    }
}

impl AbsDiffEq for Frame {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        DEFAULT_TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.matrix.abs_diff_eq(&other.matrix, epsilon)
    }
}

impl RelativeEq for Frame {
    fn default_max_relative() -> f64 {
        DEFAULT_TOLERANCE
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.matrix.relative_eq(&other.matrix, epsilon, max_relative)
    }
}

/// Normalize `v`, failing on zero length.
///
/// # Errors
///
/// Returns [`FrameError::ZeroLengthVector`] naming `operation` if `v` has zero length.
pub fn normalize(v: Vector3<f64>, operation: &'static str) -> FrameResult<Vector3<f64>> {
    v.try_normalize(f64::EPSILON)
        .filter(|n| n.iter().all(|c| c.is_finite()))
        .ok_or(FrameError::ZeroLengthVector { operation })
}

/// A unit vector perpendicular to the unit vector `v`.
fn any_perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
    let reference = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&reference).normalize()
}

/// Shortest-arc rotation mapping the direction of `from` onto the direction of `to`.
///
/// Parallel inputs give the identity; anti-parallel inputs give a half turn
/// about an arbitrary axis perpendicular to `from`.
///
/// # Errors
///
/// Returns [`FrameError::ZeroLengthVector`] if either vector has zero length.
pub fn rotation_to_align(from: Vector3<f64>, to: Vector3<f64>) -> FrameResult<Frame> {
    let from = normalize(from, "rotation_to_align")?;
    let to = normalize(to, "rotation_to_align")?;

    let cross = from.cross(&to);
    let sin = cross.norm();
    let cos = from.dot(&to);

    if sin < PARALLEL_EPSILON {
        if cos > 0.0 {
            return Ok(Frame::identity());
        }
        return Ok(Frame::rotation_unit_sin_cos(
            &any_perpendicular(&from),
            0.0,
            -1.0,
        ));
    }

    Ok(Frame::rotation_unit_sin_cos(&(cross / sin), sin, cos))
}

/// Twist about `preserve_axis` that brings `align_axis` into the plane normal to `plane_normal`.
///
/// Of the two twists that satisfy the constraint the one with the smaller
/// angle (at most a quarter turn) is returned. If `align_axis` already lies in
/// the plane, or every twist does, the identity is returned.
///
/// # Errors
///
/// Returns [`FrameError::ZeroLengthVector`] if any axis has zero length or if
/// `align_axis` is parallel to `preserve_axis`.
pub fn rotation_about_to_plane(
    preserve_axis: Vector3<f64>,
    align_axis: Vector3<f64>,
    plane_normal: Vector3<f64>,
) -> FrameResult<Frame> {
    let p = normalize(preserve_axis, "rotation_about_to_plane")?;
    let n = normalize(plane_normal, "rotation_about_to_plane")?;
    let a = normalize(
        align_axis - p * p.dot(&align_axis),
        "rotation_about_to_plane",
    )?;
    let b = p.cross(&a);

    let an = a.dot(&n);
    let bn = b.dot(&n);
    if an.abs() < PARALLEL_EPSILON {
        return Ok(Frame::identity());
    }

    let mut theta = (-an).atan2(bn);
    if theta > FRAC_PI_2 {
        theta -= PI;
    } else if theta <= -FRAC_PI_2 {
        theta += PI;
    }

    Ok(Frame::rotation_unit_sin_cos(
        &p,
        clean(theta.sin()),
        clean(theta.cos()),
    ))
}

/// Intersect the Z axis of `line` with the XY plane of `plane`.
///
/// The result keeps the orientation of `line`, translated along its own Z
/// axis to the intersection point. Returns `None` when the line is parallel
/// to the plane.
#[must_use]
pub fn plane_line_intersect(plane: &Frame, line: &Frame) -> Option<Frame> {
    let normal = plane.axis(2);
    let direction = line.axis(2);
    let denom = normal.dot(&direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = normal.dot(&(plane.translation_vector() - line.translation_vector())) / denom;
    Some(*line * Frame::translation(0.0, 0.0, t))
}
