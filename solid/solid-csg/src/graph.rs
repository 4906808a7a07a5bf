//! Provenance graph.
//!
//! A directed graph mirroring the logical composition tree. Every entry
//! visited by the render engine becomes a node, whether or not it contributes
//! geometry, so the graph shows where each CSG node came from.

use std::fmt::{self, Write};

use hashbrown::HashMap;
use solid_types::{NamePart, ShapeName};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle of a node in a [`ProvenanceGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in creation order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A node of the provenance graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProvenanceNode {
    /// Entry name.
    pub label: ShapeName,
    /// Type of the shape that produced the node.
    pub type_label: Option<String>,
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl ProvenanceNode {
    /// The text the DOT identifier is derived from.
    fn id_stem(&self) -> Option<&str> {
        match &self.label {
            ShapeName::Text(s) => Some(s),
            ShapeName::Tuple(parts) => match parts.first() {
                Some(NamePart::Text(s)) => Some(s),
                _ => None,
            },
        }
    }
}

/// Directed graph of named nodes.
///
/// # Example
///
/// ```
/// use solid_csg::ProvenanceGraph;
///
/// let mut graph = ProvenanceGraph::new();
/// let root = graph.new_node("root", None);
/// let child = graph.new_node("box1", Some("Cuboid"));
/// graph.add_edge(root, child);
///
/// assert_eq!(graph.children(root), &[child]);
/// assert!(graph.dump("D").contains("root_1 -> box1_2;"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProvenanceGraph {
    nodes: Vec<ProvenanceNode>,
    edges: Vec<(NodeId, NodeId)>,
    children: HashMap<NodeId, Vec<NodeId>>,
    parents: HashMap<NodeId, NodeId>,
}

impl ProvenanceGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node.
    pub fn new_node(&mut self, label: impl Into<ShapeName>, type_label: Option<&str>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ProvenanceNode {
            label: label.into(),
            type_label: type_label.map(str::to_string),
        });
        id
    }

    /// Add an edge from `parent` to `child`.
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) {
        self.edges.push((parent, child));
        self.children.entry(parent).or_default().push(child);
        self.parents.insert(child, parent);
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&ProvenanceNode> {
        self.nodes.get(id.0)
    }

    /// Nodes with their handles, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ProvenanceNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Edges in creation order.
    #[must_use]
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of `id`, in edge order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parent of `id`, if it has one.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    /// Labels from below the root down to `id`.
    ///
    /// The root itself is not included, so a child of the root has a path of
    /// length one.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<ShapeName> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if let Some(node) = self.node(current) {
                path.push(node.label.clone());
            }
            current = parent;
        }
        path.reverse();
        path
    }

    /// First node carrying `label`.
    #[must_use]
    pub fn find(&self, label: &ShapeName) -> Option<NodeId> {
        self.nodes()
            .find(|(_, n)| &n.label == label)
            .map(|(id, _)| id)
    }

    /// DOT identifier of a node: `label_N` for identifier labels, otherwise `N`.
    #[must_use]
    pub fn dot_id(&self, id: NodeId) -> String {
        let number = id.0 + 1;
        match self.node(id).and_then(ProvenanceNode::id_stem) {
            Some(stem) if is_identifier(stem) => format!("{stem}_{number}"),
            _ => number.to_string(),
        }
    }

    /// Render the graph in GraphViz DOT syntax.
    #[must_use]
    pub fn dump(&self, name: &str) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_dot(&mut out, name);
        out
    }

    fn write_dot(&self, out: &mut String, name: &str) -> fmt::Result {
        writeln!(out, "digraph {name} {{")?;
        for (id, node) in self.nodes() {
            write!(
                out,
                "    {} [label=\"{}\"",
                self.dot_id(id),
                escape(&node.label.to_string())
            )?;
            if let Some(tip) = &node.type_label {
                write!(out, ", tooltip=\"{}\"", escape(tip))?;
            }
            writeln!(out, "];")?;
        }
        for (start, end) in &self.edges {
            writeln!(out, "    {} -> {};", self.dot_id(*start), self.dot_id(*end))?;
        }
        writeln!(out, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ProvenanceGraph, NodeId, NodeId, NodeId) {
        let mut g = ProvenanceGraph::new();
        let root = g.new_node("root", None);
        let a = g.new_node("box1", Some("Cuboid"));
        let b = g.new_node(ShapeName::indexed("lead", 3), Some("Cone"));
        g.add_edge(root, a);
        g.add_edge(a, b);
        (g, root, a, b)
    }

    #[test]
    fn children_and_parents() {
        let (g, root, a, b) = sample();
        assert_eq!(g.children(root), &[a]);
        assert_eq!(g.children(a), &[b]);
        assert!(g.children(b).is_empty());
        assert_eq!(g.parent(b), Some(a));
        assert_eq!(g.parent(root), None);
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn path_excludes_root() {
        let (g, root, _, b) = sample();
        assert!(g.path(root).is_empty());
        assert_eq!(
            g.path(b),
            vec![ShapeName::from("box1"), ShapeName::indexed("lead", 3)]
        );
    }

    #[test]
    fn dot_ids() {
        let mut g = ProvenanceGraph::new();
        let a = g.new_node("base", None);
        let b = g.new_node("two words", None);
        let c = g.new_node(ShapeName::indexed("lead", 0), None);
        let d = g.new_node("3d", None);
        assert_eq!(g.dot_id(a), "base_1");
        assert_eq!(g.dot_id(b), "2");
        assert_eq!(g.dot_id(c), "lead_3");
        assert_eq!(g.dot_id(d), "4");
    }

    #[test]
    fn dump_format() {
        let (g, _, _, _) = sample();
        let expected = "\
digraph D {
    root_1 [label=\"root\"];
    box1_2 [label=\"box1\", tooltip=\"Cuboid\"];
    lead_3 [label=\"('lead', 3)\", tooltip=\"Cone\"];
    root_1 -> box1_2;
    box1_2 -> lead_3;
}
";
        assert_eq!(g.dump("D"), expected);
    }

    #[test]
    fn find_by_label() {
        let (g, _, a, _) = sample();
        assert_eq!(g.find(&ShapeName::from("box1")), Some(a));
        assert_eq!(g.find(&ShapeName::from("nope")), None);
    }
}
