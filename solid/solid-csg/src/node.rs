//! CSG node tree.

use bitflags::bitflags;
use solid_types::{Colour, CompositionMode, Frame, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Debug modifiers attachable to any node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Modifiers: u8 {
        /// Exclude the subtree (`*`).
        const DISABLE = 1 << 0;
        /// Show only the subtree (`!`).
        const SHOW_ONLY = 1 << 1;
        /// Highlight the subtree (`#`).
        const DEBUG = 1 << 2;
        /// Render the subtree as background (`%`).
        const TRANSPARENT = 1 << 3;
    }
}

impl Modifiers {
    /// OpenSCAD prefix characters for the set modifiers, in a fixed order.
    #[must_use]
    pub fn scad_prefix(self) -> String {
        [
            (Self::DISABLE, '*'),
            (Self::SHOW_ONLY, '!'),
            (Self::DEBUG, '#'),
            (Self::TRANSPARENT, '%'),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, c)| *c)
        .collect()
    }
}

/// A parameter value of a leaf primitive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamValue {
    /// Real number.
    Number(f64),
    /// Integer.
    Int(i64),
    /// Boolean.
    Bool(bool),
    /// List of reals.
    Vector(Vec<f64>),
    /// Text.
    Text(String),
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<[f64; 3]> for ParamValue {
    fn from(v: [f64; 3]) -> Self {
        Self::Vector(v.to_vec())
    }
}

impl From<Vector3<f64>> for ParamValue {
    fn from(v: Vector3<f64>) -> Self {
        Self::Vector(v.iter().copied().collect())
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// An opaque leaf supplied by a shape: a kind plus ordered parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Primitive {
    /// Primitive kind, e.g. `cube`.
    pub kind: String,
    /// Parameters in emission order.
    pub params: Vec<(String, ParamValue)>,
}

impl Primitive {
    /// A primitive with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Append a parameter only if `value` is set.
    #[must_use]
    pub fn with_optional_param<V: Into<ParamValue>>(
        self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(v) => self.with_param(name, v),
            None => self,
        }
    }

    /// Look up a parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// The operation performed by a node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CsgOp {
    /// Union of children.
    Union,
    /// First child minus the rest.
    Difference,
    /// Intersection of children.
    Intersection,
    /// Convex hull of children.
    Hull,
    /// Minkowski sum of children.
    Minkowski,
    /// Children transformed by a frame.
    Multmatrix(Frame),
    /// Children coloured.
    Color(Colour),
    /// Leaf geometry.
    Primitive(Primitive),
}

impl CsgOp {
    /// The operator that combines solids of a container in `mode`.
    #[must_use]
    pub const fn container_for(mode: CompositionMode) -> Self {
        match mode {
            CompositionMode::Intersect => Self::Intersection,
            CompositionMode::Hull => Self::Hull,
            CompositionMode::Minkowski => Self::Minkowski,
            CompositionMode::Solid
            | CompositionMode::Hole
            | CompositionMode::Composite
            | CompositionMode::Cage => Self::Union,
        }
    }

    /// OpenSCAD keyword of the operation.
    #[must_use]
    pub fn keyword(&self) -> &str {
        match self {
            Self::Union => "union",
            Self::Difference => "difference",
            Self::Intersection => "intersection",
            Self::Hull => "hull",
            Self::Minkowski => "minkowski",
            Self::Multmatrix(_) => "multmatrix",
            Self::Color(_) => "color",
            Self::Primitive(p) => &p.kind,
        }
    }
}

/// A node of the emitted CSG tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CsgNode {
    op: CsgOp,
    children: Vec<CsgNode>,
    modifiers: Modifiers,
    name: Option<String>,
}

impl CsgNode {
    // ========================================================================
    // Construction
    // ========================================================================

    /// A childless node performing `op`.
    #[must_use]
    pub const fn new(op: CsgOp) -> Self {
        Self {
            op,
            children: Vec::new(),
            modifiers: Modifiers::empty(),
            name: None,
        }
    }

    /// An empty union.
    #[must_use]
    pub const fn union() -> Self {
        Self::new(CsgOp::Union)
    }

    /// An empty difference.
    #[must_use]
    pub const fn difference() -> Self {
        Self::new(CsgOp::Difference)
    }

    /// An empty intersection.
    #[must_use]
    pub const fn intersection() -> Self {
        Self::new(CsgOp::Intersection)
    }

    /// An empty hull.
    #[must_use]
    pub const fn hull() -> Self {
        Self::new(CsgOp::Hull)
    }

    /// An empty Minkowski sum.
    #[must_use]
    pub const fn minkowski() -> Self {
        Self::new(CsgOp::Minkowski)
    }

    /// A transform wrapper.
    #[must_use]
    pub const fn multmatrix(frame: Frame) -> Self {
        Self::new(CsgOp::Multmatrix(frame))
    }

    /// A colour wrapper.
    #[must_use]
    pub const fn color(colour: Colour) -> Self {
        Self::new(CsgOp::Color(colour))
    }

    /// A leaf.
    #[must_use]
    pub const fn primitive(primitive: Primitive) -> Self {
        Self::new(CsgOp::Primitive(primitive))
    }

    /// The empty container that combines solids in `mode`.
    #[must_use]
    pub const fn mode_container(mode: CompositionMode) -> Self {
        Self::new(CsgOp::container_for(mode))
    }

    /// Add a child (builder form).
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Add children (builder form).
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set the metadata name (builder form).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add modifiers (builder form).
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append a child.
    pub fn push(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Append children.
    pub fn extend(&mut self, children: impl IntoIterator<Item = Self>) {
        self.children.extend(children);
    }

    /// Set the metadata name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Add modifiers.
    pub fn add_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers |= modifiers;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The operation.
    #[must_use]
    pub const fn op(&self) -> &CsgOp {
        &self.op
    }

    /// Children in emission order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Attached modifiers.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Metadata name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The frame of a transform node.
    #[must_use]
    pub const fn frame(&self) -> Option<&Frame> {
        match &self.op {
            CsgOp::Multmatrix(f) => Some(f),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Depth-first search for the first node satisfying `pred`.
    pub fn find(&self, pred: &impl Fn(&Self) -> bool) -> Option<&Self> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(pred))
    }

    /// First node in this subtree carrying `name`.
    #[must_use]
    pub fn find_named(&self, name: &str) -> Option<&Self> {
        self.find(&|n: &Self| n.name() == Some(name))
    }

    /// Leaves of this subtree in emission order.
    #[must_use]
    pub fn primitives(&self) -> Vec<&Primitive> {
        let mut out = Vec::new();
        self.collect_primitives(&mut out);
        out
    }

    fn collect_primitives<'a>(&'a self, out: &mut Vec<&'a Primitive>) {
        if let CsgOp::Primitive(p) = &self.op {
            out.push(p);
        }
        for child in &self.children {
            child.collect_primitives(out);
        }
    }

    /// Structural equality ignoring metadata names.
    #[must_use]
    pub fn same_geometry(&self, other: &Self) -> bool {
        self.op == other.op
            && self.modifiers == other.modifiers
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_geometry(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(size: f64) -> CsgNode {
        CsgNode::primitive(Primitive::new("cube").with_param("size", [size, size, size]))
    }

    #[test]
    fn mode_containers() {
        assert_eq!(
            CsgNode::mode_container(CompositionMode::Solid).op(),
            &CsgOp::Union
        );
        assert_eq!(
            CsgNode::mode_container(CompositionMode::Hull).op(),
            &CsgOp::Hull
        );
        assert_eq!(
            CsgNode::mode_container(CompositionMode::Intersect).op(),
            &CsgOp::Intersection
        );
        assert_eq!(
            CsgNode::mode_container(CompositionMode::Minkowski).op(),
            &CsgOp::Minkowski
        );
    }

    #[test]
    fn same_geometry_ignores_names() {
        let a = CsgNode::union().with_child(cube(1.0)).with_name("a");
        let b = CsgNode::union().with_child(cube(1.0).with_name("inner"));
        assert!(a.same_geometry(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn same_geometry_detects_differences() {
        let a = CsgNode::union().with_child(cube(1.0));
        assert!(!a.same_geometry(&CsgNode::union().with_child(cube(2.0))));
        assert!(!a.same_geometry(&CsgNode::union()));
        assert!(!a.same_geometry(&a.clone().with_modifiers(Modifiers::DISABLE)));
    }

    #[test]
    fn node_count_and_find() {
        let tree = CsgNode::difference()
            .with_child(CsgNode::union().with_child(cube(2.0)))
            .with_child(cube(1.0).with_name("cut"));

        assert_eq!(tree.node_count(), 4);
        assert!(tree.find_named("cut").is_some());
        assert!(tree.find_named("missing").is_none());
        assert_eq!(tree.primitives().len(), 2);
    }

    #[test]
    fn modifier_prefix_order() {
        let all = Modifiers::all();
        assert_eq!(all.scad_prefix(), "*!#%");
        assert_eq!((Modifiers::TRANSPARENT | Modifiers::DEBUG).scad_prefix(), "#%");
        assert_eq!(Modifiers::empty().scad_prefix(), "");
    }

    #[test]
    fn primitive_params() {
        let p = Primitive::new("sphere")
            .with_param("r", 2.0)
            .with_optional_param::<u32>("$fn", None)
            .with_optional_param("$fa", Some(6.0));
        assert_eq!(p.param("r"), Some(&ParamValue::Number(2.0)));
        assert!(p.param("$fn").is_none());
        assert_eq!(p.params.len(), 2);
    }
}
