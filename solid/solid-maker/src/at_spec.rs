//! Deferred anchor lookups.

use solid_types::{AnchorPath, Frame};

use crate::error::MakerResult;
use crate::shape::Shape;

/// An anchor path with optional pre and post transforms, applied later to
/// whatever shape is supplied.
///
/// Applying yields `pre · shape.anchor(path) · post`.
///
/// # Example
///
/// ```
/// use solid_maker::AtSpec;
/// use solid_types::{Frame, anchor_path};
///
/// let spec = AtSpec::new(anchor_path!("top")).with_post(Frame::rotation_x(180.0));
/// assert_eq!(spec.path().head_name(), Some("top"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtSpec {
    path: AnchorPath,
    pre: Frame,
    post: Frame,
}

impl AtSpec {
    /// A spec resolving `path` with no extra transforms.
    #[must_use]
    pub fn new(path: AnchorPath) -> Self {
        Self {
            path,
            pre: Frame::identity(),
            post: Frame::identity(),
        }
    }

    /// Set the transform applied after (outside) the anchor frame.
    #[must_use]
    pub fn with_pre(mut self, pre: Frame) -> Self {
        self.pre = pre;
        self
    }

    /// Set the transform applied in the anchor's local frame.
    #[must_use]
    pub fn with_post(mut self, post: Frame) -> Self {
        self.post = post;
        self
    }

    /// The anchor path.
    #[must_use]
    pub const fn path(&self) -> &AnchorPath {
        &self.path
    }

    /// The pre transform.
    #[must_use]
    pub const fn pre(&self) -> &Frame {
        &self.pre
    }

    /// The post transform.
    #[must_use]
    pub const fn post(&self) -> &Frame {
        &self.post
    }

    /// Resolve against `target`.
    ///
    /// # Errors
    ///
    /// Returns whatever the target's anchor resolution returns.
    pub fn apply(&self, target: &dyn Shape) -> MakerResult<Frame> {
        let anchor = if self.path.is_empty() {
            Frame::identity()
        } else {
            target.anchor(&self.path)?
        };
        Ok(self.pre * anchor * self.post)
    }
}

impl From<AnchorPath> for AtSpec {
    fn from(path: AnchorPath) -> Self {
        Self::new(path)
    }
}
