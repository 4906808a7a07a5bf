//! Curve tessellation settings shared by round shapes.

use solid_csg::Primitive;
use solid_types::Attributes;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-shape overrides of `$fn`, `$fa` and `$fs`.
///
/// Unset fields fall back to the attributes in effect when the shape is
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Resolution {
    /// Fixed segment count.
    pub segments: Option<u32>,
    /// Minimum angle per segment in degrees.
    pub min_angle: Option<f64>,
    /// Minimum segment length.
    pub min_size: Option<f64>,
}

impl Resolution {
    /// Append the effective settings to `primitive`.
    pub(crate) fn apply(&self, primitive: Primitive, current: &Attributes) -> Primitive {
        primitive
            .with_optional_param("$fn", self.segments.or(current.segments))
            .with_optional_param("$fa", self.min_angle.or(current.min_angle))
            .with_optional_param("$fs", self.min_size.or(current.min_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solid_csg::ParamValue;

    #[test]
    fn test_own_settings_win() {
        let res = Resolution {
            segments: Some(12),
            ..Resolution::default()
        };
        let current = Attributes::new().with_segments(40).with_min_size(0.5);
        let prim = res.apply(Primitive::new("sphere"), &current);
        assert_eq!(prim.param("$fn"), Some(&ParamValue::Int(12)));
        assert_eq!(prim.param("$fs"), Some(&ParamValue::Number(0.5)));
        assert!(prim.param("$fa").is_none());
    }

    #[test]
    fn test_nothing_set_adds_nothing() {
        let prim = Resolution::default().apply(Primitive::new("sphere"), &Attributes::new());
        assert!(prim.params.is_empty());
    }
}
