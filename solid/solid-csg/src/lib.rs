//! CSG output model for anchored solid composition.
//!
//! The render engine lowers a composition into two products:
//!
//! - [`CsgNode`] - A tree of boolean operators, transform and colour wrappers
//!   and opaque leaf primitives, ready for a CSG backend
//! - [`ProvenanceGraph`] - A debug graph mirroring the logical composition
//!   tree, including entries that contribute no geometry
//!
//! # Layer 0 Crate
//!
//! This crate knows nothing about shapes or anchors. It is a plain data model
//! with a deterministic OpenSCAD-style text emitter ([`CsgNode::to_scad`]) for
//! golden comparisons and a GraphViz DOT writer ([`ProvenanceGraph::dump`]).
//!
//! # Example
//!
//! ```
//! use solid_csg::{CsgNode, Modifiers, Primitive};
//! use solid_types::Frame;
//!
//! let cube = CsgNode::primitive(Primitive::new("cube").with_param("size", [1.0, 1.0, 1.0]));
//! let moved = CsgNode::multmatrix(Frame::translation(0.5, 0.0, 0.0)).with_child(cube);
//! let root = CsgNode::union().with_child(moved).with_modifiers(Modifiers::DEBUG);
//!
//! assert!(root.to_scad().starts_with("#union() {"));
//! assert_eq!(root.node_count(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod graph;
mod node;
mod scad;

pub use graph::{NodeId, ProvenanceGraph, ProvenanceNode};
pub use node::{CsgNode, CsgOp, Modifiers, ParamValue, Primitive};
