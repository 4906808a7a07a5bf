//! The composition tree.
//!
//! A [`Maker`] holds an insertion-ordered set of named entries. The first
//! entry is the root shape; later entries are attached relative to anchors of
//! what was added before them.

use std::sync::Arc;

use indexmap::IndexMap;
use solid_types::{
    AnchorPath, Attributes, CompositionMode, Frame, ShapeName, plane_line_intersect,
};
use tracing::debug;

use crate::at_spec::AtSpec;
use crate::error::{MakerError, MakerResult, RenderResult};
use crate::named::NamedShape;
use crate::render::Renderer;
use crate::shape::Shape;

/// One placed shape inside a [`Maker`].
#[derive(Debug, Clone)]
pub struct Entry {
    name: ShapeName,
    shape: Arc<dyn Shape>,
    mode: CompositionMode,
    frame: Frame,
    attributes: Attributes,
}

impl Entry {
    /// The entry name.
    #[must_use]
    pub const fn name(&self) -> &ShapeName {
        &self.name
    }

    /// The placed shape.
    #[must_use]
    pub fn shape(&self) -> &Arc<dyn Shape> {
        &self.shape
    }

    /// How the entry contributes when rendered.
    #[must_use]
    pub const fn mode(&self) -> CompositionMode {
        self.mode
    }

    /// Maps the entry shape's local space into the Maker's space.
    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Render attributes of the entry.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn pre_mul(self, frame: &Frame) -> Self {
        Self {
            frame: frame * &self.frame,
            ..self
        }
    }
}

/// A composition of named shapes.
///
/// # Example
///
/// Makers are built with [`ShapeExt`](crate::ShapeExt) and placement methods,
/// then grown with [`add`](Maker::add) and [`add_at`](Maker::add_at). See the
/// `solid-shapes` crate for complete examples with concrete shapes.
#[derive(Debug, Clone)]
pub struct Maker {
    root: ShapeName,
    entries: IndexMap<ShapeName, Entry>,
}

impl Maker {
    /// A Maker whose root entry is `named`, placed with `frame`.
    pub(crate) fn from_root(named: NamedShape, frame: Frame) -> Self {
        let (shape, mode, name, attributes) = named.into_parts();
        let mut entries = IndexMap::new();
        entries.insert(
            name.clone(),
            Entry {
                name: name.clone(),
                shape,
                mode,
                frame,
                attributes,
            },
        );
        Self {
            root: name,
            entries,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Name of the root entry.
    #[must_use]
    pub const fn root_name(&self) -> &ShapeName {
        &self.root
    }

    /// The root entry.
    #[must_use]
    pub fn root(&self) -> Option<&Entry> {
        self.entries.get(&self.root)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn entry(&self, name: &ShapeName) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Whether an entry with `name` exists.
    #[must_use]
    pub fn contains(&self, name: &ShapeName) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the Maker has no entries. A constructed Maker always has its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ========================================================================
    // Building
    // ========================================================================

    fn insert_all(&mut self, entries: Vec<Entry>) -> MakerResult<&mut Self> {
        // Names are checked up front so a failed add leaves self unchanged.
        {
            let mut incoming = hashbrown::HashSet::with_capacity(entries.len());
            for entry in &entries {
                if self.entries.contains_key(&entry.name) || !incoming.insert(&entry.name) {
                    return Err(MakerError::NameCollision {
                        name: entry.name.clone(),
                    });
                }
            }
        }
        for entry in entries {
            self.entries.insert(entry.name.clone(), entry);
        }
        Ok(self)
    }

    /// Attach every entry of `child` as-is.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::NameCollision`] if any child entry name is taken;
    /// nothing is added in that case.
    pub fn add(&mut self, child: Self) -> MakerResult<&mut Self> {
        debug!(child = %child.root, entries = child.len(), "add");
        self.insert_all(child.entries.into_values().collect())
    }

    /// Attach every entry of `child`, pre-multiplied by `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::NameCollision`] if any child entry name is taken.
    pub fn add_at_frame(&mut self, child: Self, frame: &Frame) -> MakerResult<&mut Self> {
        let entries = child
            .entries
            .into_values()
            .map(|e| e.pre_mul(frame))
            .collect();
        self.insert_all(entries)
    }

    /// Attach `child` at the anchor `path` of the composition built so far.
    ///
    /// # Errors
    ///
    /// Returns the anchor error if `path` does not resolve against the entries
    /// added so far, or [`MakerError::NameCollision`].
    pub fn add_at(&mut self, child: Self, path: &AnchorPath) -> MakerResult<&mut Self> {
        self.add_at_with(child, path, &Frame::identity(), &Frame::identity())
    }

    /// Attach `child` at `pre · anchor(path) · post`.
    ///
    /// # Errors
    ///
    /// As for [`add_at`](Self::add_at).
    pub fn add_at_with(
        &mut self,
        child: Self,
        path: &AnchorPath,
        pre: &Frame,
        post: &Frame,
    ) -> MakerResult<&mut Self> {
        let anchor = self.anchor(path)?;
        let local = pre * &anchor * *post;
        debug!(child = %child.root, path = %path, "add_at");
        self.add_at_frame(child, &local)
    }

    /// Attach `child` at a deferred anchor spec resolved against this Maker.
    ///
    /// # Errors
    ///
    /// As for [`add_at`](Self::add_at).
    pub fn add_at_spec(&mut self, child: Self, spec: &AtSpec) -> MakerResult<&mut Self> {
        let local = spec.apply(&*self)?;
        self.add_at_frame(child, &local)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Intersection of the Z axis of `line` with the XY plane of `plane`,
    /// both resolved against this Maker.
    ///
    /// Returns `Ok(None)` if the line is parallel to the plane.
    ///
    /// # Errors
    ///
    /// Returns the anchor error if either spec does not resolve.
    pub fn find_intersection(&self, plane: &AtSpec, line: &AtSpec) -> MakerResult<Option<Frame>> {
        let plane = plane.apply(self)?;
        let line = line.apply(self)?;
        Ok(plane_line_intersect(&plane, &line))
    }

    fn unknown(&self, anchor: String) -> MakerError {
        MakerError::UnknownAnchor {
            shape: format!("Maker({})", self.root),
            anchor,
            available: self.anchor_names(),
        }
    }
}

impl Shape for Maker {
    fn type_name(&self) -> &str {
        "Maker"
    }

    fn anchor(&self, path: &AnchorPath) -> MakerResult<Frame> {
        let Some(head) = path.head() else {
            if path.is_empty() {
                return Ok(Frame::identity());
            }
            return Err(self.unknown(path.to_string()));
        };

        if let (Some(name), Some(root)) = (head.as_str(), self.root())
            && root.shape.has_anchor(name)
        {
            return Ok(root.frame * root.shape.anchor(path)?);
        }

        let entry = head
            .as_shape_name()
            .and_then(|name| self.entries.get(&name))
            .ok_or_else(|| self.unknown(head.to_string()))?;
        Ok(entry.frame * entry.shape.anchor(&path.rest())?)
    }

    fn anchor_names(&self) -> Vec<String> {
        let mut names = self
            .root()
            .map(|r| r.shape.anchor_names())
            .unwrap_or_default();
        names.extend(self.entries.keys().map(ToString::to_string));
        names
    }

    fn has_anchor(&self, name: &str) -> bool {
        self.root().is_some_and(|r| r.shape.has_anchor(name))
            || self.entries.contains_key(&ShapeName::from(name))
    }

    fn render(&self, renderer: &mut Renderer) -> RenderResult<()> {
        for entry in self.entries.values() {
            renderer.push(
                entry.mode,
                &entry.frame,
                &entry.attributes,
                &entry.name,
                Some(entry.shape.type_name()),
            );
            entry.shape.render(renderer)?;
            renderer.pop()?;
        }
        Ok(())
    }
}
