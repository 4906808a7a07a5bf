//! Render configuration.

use solid_types::{Attributes, Frame};

/// Label of the root container and provenance node unless configured.
pub const DEFAULT_ROOT_LABEL: &str = "root";

/// Configuration for a render pass.
///
/// # Example
///
/// ```
/// use solid_maker::RenderConfig;
/// use solid_types::Frame;
///
/// let config = RenderConfig::fine().with_initial_frame(Frame::rotation_x(90.0));
/// assert_eq!(config.initial_attributes.min_angle, Some(2.0));
/// assert_eq!(config.root_label, "root");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Frame applied to the whole model.
    pub initial_frame: Frame,

    /// Attributes inherited by every shape.
    pub initial_attributes: Attributes,

    /// Label of the root provenance node, also used to name containers
    /// synthesized at the root.
    pub root_label: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            initial_frame: Frame::identity(),
            initial_attributes: Attributes::new(),
            root_label: DEFAULT_ROOT_LABEL.to_string(),
        }
    }
}

impl RenderConfig {
    /// Coarse curve resolution for quick previews.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            initial_attributes: Attributes::new().with_min_angle(12.0).with_min_size(2.0),
            ..Self::default()
        }
    }

    /// Fine curve resolution for final output.
    #[must_use]
    pub fn fine() -> Self {
        Self {
            initial_attributes: Attributes::new().with_min_angle(2.0).with_min_size(0.2),
            ..Self::default()
        }
    }

    /// Set the frame applied to the whole model.
    #[must_use]
    pub fn with_initial_frame(mut self, frame: Frame) -> Self {
        self.initial_frame = frame;
        self
    }

    /// Set the inherited attributes.
    #[must_use]
    pub fn with_initial_attributes(mut self, attributes: Attributes) -> Self {
        self.initial_attributes = attributes;
        self
    }

    /// Set the root label.
    #[must_use]
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert!(config.initial_frame.is_identity());
        assert!(config.initial_attributes.is_empty());
        assert_eq!(config.root_label, DEFAULT_ROOT_LABEL);
    }

    #[test]
    fn test_presets() {
        let draft = RenderConfig::draft();
        let fine = RenderConfig::fine();
        assert!(draft.initial_attributes.min_angle > fine.initial_attributes.min_angle);
        assert!(draft.initial_attributes.min_size > fine.initial_attributes.min_size);
        assert_eq!(draft.initial_attributes.segments, None);
    }

    #[test]
    fn test_builders() {
        let config = RenderConfig::default()
            .with_initial_frame(Frame::translation(1.0, 2.0, 3.0))
            .with_initial_attributes(Attributes::new().with_segments(32))
            .with_root_label("model");
        assert_eq!(config.initial_frame, Frame::translation(1.0, 2.0, 3.0));
        assert_eq!(config.initial_attributes.segments, Some(32));
        assert_eq!(config.root_label, "model");
    }
}
