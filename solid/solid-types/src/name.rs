//! Names of shapes inside a composition.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One component of a structured [`ShapeName`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NamePart {
    /// A text component.
    Text(String),
    /// An integer component (typically an index).
    Int(i64),
}

impl fmt::Display for NamePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for NamePart {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for NamePart {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

/// The key of an entry in a composition.
///
/// Either a plain text name (`"box1"`) or a structured tuple such as
/// `('lead', 3)` used for families of repeated parts.
///
/// # Example
///
/// ```
/// use solid_types::ShapeName;
///
/// assert_eq!(ShapeName::from("base").to_string(), "base");
/// assert_eq!(ShapeName::indexed("lead", 3).to_string(), "('lead', 3)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeName {
    /// A plain text name.
    Text(String),
    /// A structured name.
    Tuple(Vec<NamePart>),
}

impl ShapeName {
    /// Create a text name.
    pub fn text(name: impl Into<String>) -> Self {
        Self::Text(name.into())
    }

    /// Create a `(prefix, index)` name.
    pub fn indexed(prefix: impl Into<String>, index: i64) -> Self {
        Self::Tuple(vec![NamePart::Text(prefix.into()), NamePart::Int(index)])
    }

    /// Create a structured name from parts.
    #[must_use]
    pub fn tuple(parts: Vec<NamePart>) -> Self {
        Self::Tuple(parts)
    }

    /// The text of a plain name.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Tuple(_) => None,
        }
    }
}

impl fmt::Display for ShapeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Tuple(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<&str> for ShapeName {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ShapeName {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for ShapeName {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<(&str, i64)> for ShapeName {
    fn from((prefix, index): (&str, i64)) -> Self {
        Self::indexed(prefix, index)
    }
}
