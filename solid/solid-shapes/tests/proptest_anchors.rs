//! Property-based tests for catalog anchors.
//!
//! Run with: cargo test -p solid-shapes --test proptest_anchors

use proptest::prelude::*;
use solid_maker::{ShapeExt, render};
use solid_shapes::{Cone, Cuboid, Face, Sphere};
use solid_types::{Frame, Vector3};

const TOL: f64 = 1e-9;

// =============================================================================
// Strategies
// =============================================================================

fn arb_size() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(0.1..100.0f64).prop_map(Vector3::from)
}

fn arb_face() -> impl Strategy<Value = Face> {
    (0..6usize).prop_map(|i| Face::ALL[i])
}

fn is_rigid(f: &Frame) -> bool {
    let r = f.linear();
    (r.transpose() * r).is_identity(TOL) && (r.determinant() - 1.0).abs() < TOL
}

fn on_box_surface(p: &Vector3<f64>, size: &Vector3<f64>) -> bool {
    let inside = (0..3).all(|i| p[i] > -TOL && p[i] < size[i] + TOL);
    let on_face = (0..3).any(|i| p[i].abs() < TOL || (p[i] - size[i]).abs() < TOL);
    inside && on_face
}

// =============================================================================
// Property Tests: Cuboid
// =============================================================================

proptest! {
    /// Corners are vertices of the box.
    #[test]
    fn corners_are_vertices(size in arb_size(), face in arb_face(), corner in 0..4usize) {
        let cuboid = Cuboid::new(size).unwrap();
        let p = cuboid.face_corner(face, corner).translation_vector();
        for i in 0..3 {
            prop_assert!(p[i].abs() < TOL || (p[i] - size[i]).abs() < TOL, "{p:?}");
        }
    }

    /// Face centres sit on their face with Z pointing away from the box centre.
    #[test]
    fn face_centre_normal_points_out(size in arb_size(), face in arb_face()) {
        let cuboid = Cuboid::new(size).unwrap();
        let f = cuboid.face_centre(face);
        let p = f.translation_vector();
        prop_assert!(on_box_surface(&p, &size));
        let outward = p - cuboid.centre().translation_vector();
        prop_assert!(f.axis(2).dot(&outward) > 0.0);
        prop_assert!(is_rigid(&f));
    }

    /// Edge points interpolate linearly between the edge's corners.
    #[test]
    fn edge_points_interpolate(
        size in arb_size(),
        face in arb_face(),
        edge in 0..4usize,
        t in -1.0..2.0f64,
    ) {
        let cuboid = Cuboid::new(size).unwrap();
        let start = cuboid.face_corner(face, edge).translation_vector();
        let end = cuboid.face_corner(face, (edge + 1) % 4).translation_vector();
        let p = cuboid.face_edge(face, edge, t, 0.0).translation_vector();
        let expected = start + (end - start) * t;
        prop_assert!((p - expected).norm() < 1e-7, "{p:?} != {expected:?}");
    }

    /// The edge offset moves the point by exactly `d` along the edge's X axis.
    #[test]
    fn edge_offset_is_absolute(
        size in arb_size(),
        face in arb_face(),
        edge in 0..4usize,
        d in -10.0..10.0f64,
    ) {
        let cuboid = Cuboid::new(size).unwrap();
        let base = cuboid.face_edge(face, edge, 0.5, 0.0);
        let moved = cuboid.face_edge(face, edge, 0.5, d);
        let shift = moved.translation_vector() - base.translation_vector();
        prop_assert!((shift - base.axis(0) * d).norm() < 1e-7);
    }
}

// =============================================================================
// Property Tests: Round Shapes
// =============================================================================

proptest! {
    /// Sphere surface anchors are on the sphere, facing out.
    #[test]
    fn sphere_surface_on_sphere(
        r in 0.1..50.0f64,
        angles in prop::array::uniform3(-360.0..360.0f64),
    ) {
        let sphere = Sphere::new(r).unwrap();
        let f = sphere.surface(Vector3::from(angles));
        let p = f.translation_vector();
        prop_assert!((p.norm() - r).abs() < 1e-7);
        prop_assert!((f.axis(2) - p / r).norm() < 1e-7);
    }

    /// Tangent cone surface anchors sit at the cone's radius and face away from the axis.
    #[test]
    fn cone_surface_on_cone(
        h in 1.0..50.0f64,
        r_base in 0.0..20.0f64,
        r_top in 0.0..20.0f64,
        z in 0.0..1.0f64,
        degrees in -180.0..180.0f64,
    ) {
        let cone = Cone::new(h, r_base, r_top).unwrap();
        let f = cone.surface(z * h, degrees, true, 0.0).unwrap();
        let p = f.translation_vector();
        let radial = (p.x * p.x + p.y * p.y).sqrt();
        prop_assert!((radial - cone.radius_at(z * h)).abs() < 1e-7);
        prop_assert!((p.z - z * h).abs() < 1e-7);
        let n = f.axis(2);
        prop_assert!(n.x * p.x + n.y * p.y >= -1e-7);
        prop_assert!(is_rigid(&f));
    }

    /// Every cuboid renders to exactly one cube.
    #[test]
    fn cuboid_renders_one_cube(size in arb_size()) {
        let maker = Cuboid::new(size).unwrap().solid("box").at_origin();
        let output = render(&maker).unwrap();
        let prims = output.csg.primitives();
        prop_assert_eq!(prims.len(), 1);
        prop_assert_eq!(prims[0].kind.as_str(), "cube");
    }
}
