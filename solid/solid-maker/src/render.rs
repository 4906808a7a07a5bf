//! Lowering a composition into a CSG tree.
//!
//! Rendering is a depth-first walk. Every entry opens a [`Container`] on a
//! stack with [`Renderer::push`]; leaf shapes add primitives to the top
//! container with [`Renderer::add`]; [`Renderer::pop`] closes the top
//! container into its parent according to the entry's [`CompositionMode`].
//!
//! A container collects three buckets:
//!
//! - heads: wrappers (transform, colour, modifier unions) that nest around
//!   everything else, in the order they were added
//! - solids: geometry unioned (or intersected, hulled, ...) together
//! - holes: geometry subtracted from the solids
//!
//! Holes only take effect where a solid and a hole meet in the same
//! container, so a hole cuts everything added to its parent before and after
//! it but nothing outside that parent.

use std::mem;

use solid_csg::{CsgNode, Modifiers, NodeId, ProvenanceGraph};
use solid_types::{Attributes, CompositionMode, Frame, ShapeName};
use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::shape::Shape;

/// Name of unions synthesized when the final combine does not yield exactly one node.
const FINAL_UNION_NAME: &str = "pop";

/// Name of the difference node joining solids and holes.
const COMBINE_NAME: &str = "_combine_solids_and_holes";

/// Per-entry accumulator of heads, solids and holes.
#[derive(Debug, Clone)]
struct Container {
    mode: CompositionMode,
    /// Name applied to every node added to this container.
    name: Option<String>,
    /// Prefix of names of nodes synthesized by this container.
    label: String,
    heads: Vec<CsgNode>,
    solids: Vec<CsgNode>,
    holes: Vec<CsgNode>,
}

impl Container {
    fn new(mode: CompositionMode, name: Option<String>, label: String) -> Self {
        Self {
            mode,
            name,
            label,
            heads: Vec::new(),
            solids: Vec::new(),
            holes: Vec::new(),
        }
    }

    fn apply_name(&self, nodes: &mut [CsgNode]) {
        if let Some(name) = &self.name {
            for node in nodes {
                node.set_name(name.as_str());
            }
        }
    }

    fn add_solids(&mut self, mut nodes: Vec<CsgNode>) {
        self.apply_name(&mut nodes);
        self.solids.extend(nodes);
    }

    fn add_holes(&mut self, mut nodes: Vec<CsgNode>) {
        self.apply_name(&mut nodes);
        self.holes.extend(nodes);
    }

    fn add_head(&mut self, node: CsgNode) {
        let mut nodes = [node];
        self.apply_name(&mut nodes);
        let [node] = nodes;
        self.heads.push(node);
    }

    fn named_union(&self, operation: &str) -> CsgNode {
        CsgNode::union().with_name(format!("{} : {operation}", self.label))
    }

    fn named_mode_container(&self, operation: &str) -> CsgNode {
        CsgNode::mode_container(self.mode).with_name(format!("{} : {operation}", self.label))
    }

    /// Modifiers go on the outermost head; a plain union is created if there is none.
    fn first_head_mut(&mut self) -> &mut CsgNode {
        if self.heads.is_empty() {
            let head = self.named_union("get_or_create_first_head");
            self.add_head(head);
        }
        &mut self.heads[0]
    }

    /// Solids (wrapped in the mode's operator) minus holes.
    fn combine_solids_and_holes(&mut self) -> Vec<CsgNode> {
        let solids = mem::take(&mut self.solids);
        let holes = mem::take(&mut self.holes);

        if !holes.is_empty() {
            let solid = self.named_mode_container(COMBINE_NAME).with_children(solids);
            let difference = CsgNode::difference()
                .with_child(solid)
                .with_children(holes)
                .with_name(COMBINE_NAME);
            return vec![difference];
        }

        if solids.is_empty() {
            return Vec::new();
        }
        vec![self.named_mode_container(COMBINE_NAME).with_children(solids)]
    }

    /// Combined content wrapped in the head chain.
    fn build_combine(&mut self) -> Vec<CsgNode> {
        let heads = mem::take(&mut self.heads);
        let content = self.combine_solids_and_holes();
        if heads.is_empty() {
            return content;
        }
        chain_heads(heads, content).into_iter().collect()
    }

    /// Solids and holes kept apart, each inside its own copy of the head chain.
    fn build_composite(&mut self) -> (Vec<CsgNode>, Vec<CsgNode>) {
        let heads = mem::take(&mut self.heads);
        let solids = mem::take(&mut self.solids);
        let holes = mem::take(&mut self.holes);

        if heads.is_empty() {
            return (solids, holes);
        }
        if solids.is_empty() && holes.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let wrap = |content: Vec<CsgNode>, heads: Vec<CsgNode>| {
            if content.is_empty() {
                return self.named_union("build_composite");
            }
            chain_heads(heads, content).unwrap_or_else(|| self.named_union("build_composite"))
        };
        let solid = wrap(solids, heads.clone());
        let hole = wrap(holes, heads);
        (vec![solid], vec![hole])
    }

    /// Hand the result of this container to `parent`.
    fn close(mut self, parent: &mut Self) {
        if !self.mode.is_visible() {
            return;
        }
        match self.mode {
            CompositionMode::Hole => parent.add_holes(self.build_combine()),
            CompositionMode::Composite => {
                let (solids, holes) = self.build_composite();
                parent.add_solids(solids);
                parent.add_holes(holes);
            }
            _ => parent.add_solids(self.build_combine()),
        }
    }
}

/// Nest each head inside the previous one and put `content` in the last.
fn chain_heads(heads: Vec<CsgNode>, content: Vec<CsgNode>) -> Option<CsgNode> {
    let mut heads = heads.into_iter().rev();
    let mut node = heads.next()?;
    node.extend(content);
    for mut head in heads {
        head.push(node);
        node = head;
    }
    Some(node)
}

#[derive(Debug)]
struct ContextEntry {
    container: Container,
    mode: CompositionMode,
    attributes: Attributes,
    node: NodeId,
}

/// The products of a render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The CSG tree.
    pub csg: CsgNode,
    /// The logical composition tree, including cages.
    pub graph: ProvenanceGraph,
}

/// The render stack.
///
/// A new renderer holds one root container in [`Solid`](CompositionMode::Solid)
/// mode. Every [`push`](Self::push) must be matched by a [`pop`](Self::pop)
/// before [`close`](Self::close).
///
/// # Example
///
/// ```
/// use solid_csg::{CsgNode, Primitive};
/// use solid_maker::Renderer;
/// use solid_types::{Attributes, CompositionMode, Frame, ShapeName};
///
/// let mut renderer = Renderer::new();
/// renderer.push(
///     CompositionMode::Solid,
///     &Frame::translation(1.0, 0.0, 0.0),
///     &Attributes::new(),
///     &ShapeName::from("part"),
///     Some("Cube"),
/// );
/// renderer.add(CsgNode::primitive(Primitive::new("cube"))).unwrap();
/// renderer.pop().unwrap();
///
/// let output = renderer.close().unwrap();
/// assert_eq!(output.csg.primitives().len(), 1);
/// assert_eq!(output.graph.len(), 2);
/// ```
#[derive(Debug)]
pub struct Renderer {
    stack: Vec<ContextEntry>,
    graph: ProvenanceGraph,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// A renderer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&RenderConfig::default())
    }

    /// A renderer whose root container applies `config`.
    #[must_use]
    pub fn with_config(config: &RenderConfig) -> Self {
        let mut graph = ProvenanceGraph::new();
        let root = graph.new_node(ShapeName::text(config.root_label.as_str()), None);
        let mut renderer = Self {
            stack: Vec::new(),
            graph,
        };
        renderer.push_entry(
            CompositionMode::Solid,
            &config.initial_frame,
            &config.initial_attributes,
            None,
            config.root_label.clone(),
            root,
        );
        renderer
    }

    fn push_entry(
        &mut self,
        mode: CompositionMode,
        frame: &Frame,
        attributes: &Attributes,
        name: Option<String>,
        label: String,
        node: NodeId,
    ) {
        let parent = self.current_attributes();
        let merged = parent.merge(attributes);
        let diff = parent.diff(&merged);

        let mut container = Container::new(mode, name, label);
        if !frame.is_identity() {
            container.add_head(CsgNode::multmatrix(*frame));
        }
        if let Some(colour) = diff.colour {
            container.add_head(CsgNode::color(colour));
        }

        let mut modifiers = Modifiers::empty();
        for (flag, modifier) in [
            (diff.disable, Modifiers::DISABLE),
            (diff.show_only, Modifiers::SHOW_ONLY),
            (diff.debug, Modifiers::DEBUG),
            (diff.transparent, Modifiers::TRANSPARENT),
        ] {
            if flag == Some(true) {
                modifiers |= modifier;
            }
        }
        if !modifiers.is_empty() {
            container.first_head_mut().add_modifiers(modifiers);
        }

        self.stack.push(ContextEntry {
            container,
            mode,
            attributes: merged,
            node,
        });
    }

    /// Open a container for a named entry.
    ///
    /// `frame` places the entry in its parent; only attributes that differ
    /// from the inherited ones produce wrappers.
    pub fn push(
        &mut self,
        mode: CompositionMode,
        frame: &Frame,
        attributes: &Attributes,
        name: &ShapeName,
        type_label: Option<&str>,
    ) {
        let node = self.graph.new_node(name.clone(), type_label);
        if let Some(parent) = self.stack.last().map(|e| e.node) {
            self.graph.add_edge(parent, node);
        }
        let label = name.to_string();
        debug!(name = %label, mode = %mode, depth = self.stack.len(), "push");
        self.push_entry(mode, frame, attributes, Some(label.clone()), label, node);
    }

    /// Close the top container into its parent.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::PopCalledTooManyTimes`] if only the root
    /// container is left; the stack is unchanged in that case.
    pub fn pop(&mut self) -> RenderResult<()> {
        if self.stack.len() <= 1 {
            return Err(RenderError::PopCalledTooManyTimes);
        }
        let entry = self.stack.pop().ok_or(RenderError::EmptyRenderStack)?;
        debug!(mode = %entry.mode, depth = self.stack.len(), "pop");
        let parent = self
            .stack
            .last_mut()
            .ok_or(RenderError::PopCalledTooManyTimes)?;
        entry.container.close(&mut parent.container);
        Ok(())
    }

    /// Finish the render and take its products.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnpoppedItemsOnRenderStack`] if pushes are
    /// unmatched, or [`RenderError::EmptyRenderStack`] if the renderer was
    /// already closed.
    pub fn close(&mut self) -> RenderResult<RenderOutput> {
        match self.stack.len() {
            0 => return Err(RenderError::EmptyRenderStack),
            1 => {}
            n => return Err(RenderError::UnpoppedItemsOnRenderStack { count: n - 1 }),
        }
        let mut entry = self.stack.pop().ok_or(RenderError::EmptyRenderStack)?;

        let csg = match <[CsgNode; 1]>::try_from(entry.container.build_combine()) {
            Ok([single]) => single,
            Err(nodes) => {
                if nodes.is_empty() {
                    warn!("render produced no geometry");
                }
                CsgNode::union()
                    .with_name(FINAL_UNION_NAME)
                    .with_children(nodes)
            }
        };
        let graph = mem::take(&mut self.graph);
        info!(
            csg_nodes = csg.node_count(),
            provenance_nodes = graph.len(),
            "render complete"
        );
        Ok(RenderOutput { csg, graph })
    }

    /// Add a leaf to the top container's solids.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyRenderStack`] after [`close`](Self::close).
    pub fn add(&mut self, node: CsgNode) -> RenderResult<()> {
        let entry = self
            .stack
            .last_mut()
            .ok_or(RenderError::EmptyRenderStack)?;
        entry.container.add_solids(vec![node]);
        Ok(())
    }

    /// Attributes in effect for the top container.
    #[must_use]
    pub fn current_attributes(&self) -> Attributes {
        self.stack
            .last()
            .map_or_else(Attributes::new, |e| e.attributes)
    }

    /// Number of open containers, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The provenance graph built so far.
    #[must_use]
    pub const fn graph(&self) -> &ProvenanceGraph {
        &self.graph
    }
}

/// Render `shape` with the default configuration.
///
/// # Errors
///
/// Propagates errors from the shape's [`Shape::render`] and from closing the
/// render stack.
pub fn render(shape: &dyn Shape) -> RenderResult<RenderOutput> {
    render_with(shape, &RenderConfig::default())
}

/// Render `shape` with `config`.
///
/// # Errors
///
/// As for [`render`].
pub fn render_with(shape: &dyn Shape, config: &RenderConfig) -> RenderResult<RenderOutput> {
    let mut renderer = Renderer::with_config(config);
    shape.render(&mut renderer)?;
    renderer.close()
}
