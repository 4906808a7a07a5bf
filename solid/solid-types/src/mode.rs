//! Composition modes.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseModeError;

/// How a subtree contributes to its parent when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CompositionMode {
    /// Added to the parent's solids.
    #[default]
    Solid,
    /// Added to the parent's holes.
    Hole,
    /// Solids and holes are passed to the parent separately.
    Composite,
    /// Contributes no geometry; used only as an anchoring reference.
    Cage,
    /// Solids are intersected, then treated as a solid.
    Intersect,
    /// Solids are hulled, then treated as a solid.
    Hull,
    /// Solids are combined by Minkowski sum, then treated as a solid.
    Minkowski,
}

impl CompositionMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Solid,
        Self::Hole,
        Self::Composite,
        Self::Cage,
        Self::Intersect,
        Self::Hull,
        Self::Minkowski,
    ];

    /// Lowercase names of every mode, in declaration order.
    pub const NAMES: &'static [&'static str] = &[
        "solid",
        "hole",
        "composite",
        "cage",
        "intersect",
        "hull",
        "minkowski",
    ];

    /// The lowercase name of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Hole => "hole",
            Self::Composite => "composite",
            Self::Cage => "cage",
            Self::Intersect => "intersect",
            Self::Hull => "hull",
            Self::Minkowski => "minkowski",
        }
    }

    /// Whether the mode contributes geometry to its parent.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Cage)
    }
}

impl fmt::Display for CompositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompositionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseModeError {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_as_str() {
        for (mode, name) in CompositionMode::ALL.iter().zip(CompositionMode::NAMES) {
            assert_eq!(mode.as_str(), *name);
        }
    }

    #[test]
    fn parse_round_trip() {
        for mode in CompositionMode::ALL {
            let parsed: CompositionMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn parse_unknown_fails() {
        let result = "SOLID".parse::<CompositionMode>();
        assert_eq!(
            result,
            Err(ParseModeError {
                name: "SOLID".to_string()
            })
        );
    }

    #[test]
    fn only_cage_is_invisible() {
        let invisible: Vec<_> = CompositionMode::ALL
            .iter()
            .filter(|m| !m.is_visible())
            .collect();
        assert_eq!(invisible, vec![&CompositionMode::Cage]);
        assert_eq!(CompositionMode::default(), CompositionMode::Solid);
    }
}
