//! Primitive shapes with anchor vocabularies.
//!
//! - [`Cuboid`] - Axis-aligned box with corner, edge and face anchors
//! - [`Sphere`] - Sphere with pole and surface anchors
//! - [`Cone`] - Cone, frustum or cylinder with base, top and surface anchors
//!
//! Every shape renders to a single primitive leaf. Round shapes take their
//! tessellation settings from a [`Resolution`] or, where unset, from the
//! attributes in effect at render time.
//!
//! # Layer 2 Crate
//!
//! Built on `solid-maker`. Each shape also provides a demonstration model
//! through [`HasExample`].
//!
//! # Example
//!
//! ```
//! use solid_maker::{ShapeExt, render};
//! use solid_shapes::{Cone, Cuboid};
//! use solid_types::anchor_path;
//!
//! let mut maker = Cuboid::cube(10.0)?.solid("block").at_origin();
//! maker.add_at(
//!     Cone::cylinder(10.0, 2.0)?.hole("bore").at(&anchor_path!("top"))?,
//!     &anchor_path!("face_centre", "top"),
//! )?;
//!
//! let output = render(&maker).expect("renders");
//! assert_eq!(output.csg.primitives().len(), 2);
//! # Ok::<(), solid_maker::MakerError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::module_name_repetitions)]

mod cone;
mod cuboid;
mod example;
mod resolution;
mod sphere;

pub use cone::Cone;
pub use cuboid::{Cuboid, Face};
pub use example::{
    AnchorKind, EXAMPLE_ROOT_NAME, Example, ExampleAnchor, HasExample, build_example,
};
pub use resolution::Resolution;
pub use sphere::Sphere;
