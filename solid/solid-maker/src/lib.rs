//! Anchored composition of solids and lowering to CSG.
//!
//! This crate provides the composition engine:
//!
//! - [`Shape`] - The contract every placeable shape implements: anchor
//!   resolution and rendering
//! - [`AnchorTable`] - Static per-type anchor dispatch
//! - [`NamedShape`] / [`Maker`] - Named, moded entries assembled into a tree
//!   by attaching children to anchors of what came before
//! - [`AddBetween`] / [`LazyShape`] - Shapes sized and oriented to span two
//!   anchors
//! - [`Renderer`] - The stack machine that lowers a tree into a
//!   [`CsgNode`](solid_csg::CsgNode) and a provenance graph
//!
//! # Layer 1 Crate
//!
//! Depends on `solid-types` for frames and attributes and `solid-csg` for the
//! output model. Concrete shapes live in `solid-shapes`.
//!
//! # Composition Modes
//!
//! | Mode        | Contributes to the parent as                         |
//! |-------------|------------------------------------------------------|
//! | `solid`     | solid                                                |
//! | `hole`      | hole, subtracted from the parent's solids            |
//! | `composite` | its solids as solids and its holes as holes          |
//! | `cage`      | nothing; anchors only                                |
//! | `intersect` | intersection of its solids, as a solid               |
//! | `hull`      | convex hull of its solids, as a solid                |
//! | `minkowski` | Minkowski sum of its solids, as a solid              |
//!
//! # Example
//!
//! ```
//! use solid_csg::{CsgNode, CsgOp, Primitive};
//! use solid_maker::{MakerResult, Renderer, RenderResult, Shape, ShapeExt, render};
//! use solid_types::{AnchorPath, Frame, anchor_path};
//!
//! #[derive(Debug)]
//! struct Slab;
//!
//! impl Shape for Slab {
//!     fn type_name(&self) -> &str {
//!         "Slab"
//!     }
//!
//!     fn anchor(&self, path: &AnchorPath) -> MakerResult<Frame> {
//!         match path.head_name() {
//!             None => Ok(Frame::identity()),
//!             Some(_) => Ok(Frame::translation(0.0, 0.0, 1.0)),
//!         }
//!     }
//!
//!     fn anchor_names(&self) -> Vec<String> {
//!         vec!["top".into()]
//!     }
//!
//!     fn render(&self, renderer: &mut Renderer) -> RenderResult<()> {
//!         renderer.add(CsgNode::primitive(Primitive::new("cube")))
//!     }
//! }
//!
//! let mut maker = Slab.solid("base").at_origin();
//! maker.add_at(Slab.hole("cut").at_origin(), &anchor_path!("top"))?;
//!
//! let output = render(&maker).expect("renders");
//! assert_eq!(*output.csg.op(), CsgOp::Difference);
//! # Ok::<(), solid_maker::MakerError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::module_name_repetitions)]

mod anchor;
mod at_spec;
mod between;
mod config;
mod error;
mod lazy;
mod maker;
mod named;
mod render;
mod shape;

pub use anchor::{AnchorArgs, AnchorDef, AnchorFn, AnchorTable};
pub use at_spec::AtSpec;
pub use between::{AddBetween, BetweenPlacement};
pub use config::{DEFAULT_ROOT_LABEL, RenderConfig};
pub use error::{MakerError, MakerResult, RenderError, RenderResult};
pub use lazy::{LazyNamedShape, LazyShape};
pub use maker::{Entry, Maker};
pub use named::{NamedShape, WithAttributes};
pub use render::{RenderOutput, Renderer, render, render_with};
pub use shape::{Shape, ShapeExt};
