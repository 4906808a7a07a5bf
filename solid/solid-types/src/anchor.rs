//! Anchor paths.
//!
//! An [`AnchorPath`] selects a frame on a shape: the first positional
//! component names the anchor (or a child entry of a composition) and the
//! remaining components and named parameters are its arguments.

use std::collections::BTreeMap;
use std::fmt;

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::name::ShapeName;

/// One argument of an anchor path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnchorArg {
    /// Text, usually an anchor or entry name.
    Text(String),
    /// Integer, e.g. a face or edge index.
    Int(i64),
    /// Real number, e.g. a parametric position.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// A 3-vector, e.g. per-axis angles.
    Vector(Vector3<f64>),
    /// A structured entry name such as `('lead', 3)`.
    Name(ShapeName),
}

impl AnchorArg {
    /// Text value, if this is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value, if this is an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Real value; integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Vector value, if this is a vector.
    #[must_use]
    pub const fn as_vector(&self) -> Option<Vector3<f64>> {
        match self {
            Self::Vector(v) => Some(*v),
            _ => None,
        }
    }

    /// The entry name this argument denotes, if it is text or a structured name.
    #[must_use]
    pub fn as_shape_name(&self) -> Option<ShapeName> {
        match self {
            Self::Text(s) => Some(ShapeName::Text(s.clone())),
            Self::Name(n) => Some(n.clone()),
            _ => None,
        }
    }

    /// A short name for the kind of value held, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Vector(_) => "vector",
            Self::Name(_) => "name",
        }
    }
}

impl fmt::Display for AnchorArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Vector(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Self::Name(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for AnchorArg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AnchorArg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for AnchorArg {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for AnchorArg {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for AnchorArg {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for AnchorArg {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vector3<f64>> for AnchorArg {
    fn from(v: Vector3<f64>) -> Self {
        Self::Vector(v)
    }
}

impl From<[f64; 3]> for AnchorArg {
    fn from(v: [f64; 3]) -> Self {
        Self::Vector(Vector3::from(v))
    }
}

impl From<ShapeName> for AnchorArg {
    fn from(n: ShapeName) -> Self {
        match n {
            ShapeName::Text(s) => Self::Text(s),
            tuple @ ShapeName::Tuple(_) => Self::Name(tuple),
        }
    }
}

/// A path selecting an anchor frame.
///
/// Paths are plain values: build one with the [`anchor_path!`](crate::anchor_path)
/// macro or the builder methods and apply it to any shape later.
///
/// # Example
///
/// ```
/// use solid_types::{AnchorPath, anchor_path};
///
/// let a = anchor_path!("box2", "face_centre", 3);
/// let b = AnchorPath::new().arg("box2").arg("face_centre").arg(3);
/// assert_eq!(a, b);
/// assert_eq!(a.rest().head_name(), Some("face_centre"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnchorPath {
    positional: Vec<AnchorArg>,
    named: BTreeMap<String, AnchorArg>,
}

impl AnchorPath {
    /// The empty path, which resolves to the identity frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A path consisting of a single anchor name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().arg(name.into())
    }

    /// Append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<AnchorArg>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a named argument, replacing any previous value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AnchorArg>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Positional arguments.
    #[must_use]
    pub fn positional(&self) -> &[AnchorArg] {
        &self.positional
    }

    /// Named arguments.
    #[must_use]
    pub const fn named_args(&self) -> &BTreeMap<String, AnchorArg> {
        &self.named
    }

    /// Whether the path has no components at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// The first positional component.
    #[must_use]
    pub fn head(&self) -> Option<&AnchorArg> {
        self.positional.first()
    }

    /// The first positional component as text.
    #[must_use]
    pub fn head_name(&self) -> Option<&str> {
        self.head().and_then(AnchorArg::as_str)
    }

    /// The path with its first positional component removed; named arguments are kept.
    #[must_use]
    pub fn rest(&self) -> Self {
        Self {
            positional: self.positional.iter().skip(1).cloned().collect(),
            named: self.named.clone(),
        }
    }

    /// Prepend a positional component.
    #[must_use]
    pub fn prefixed(&self, head: impl Into<AnchorArg>) -> Self {
        let mut positional = Vec::with_capacity(self.positional.len() + 1);
        positional.push(head.into());
        positional.extend(self.positional.iter().cloned());
        Self {
            positional,
            named: self.named.clone(),
        }
    }
}

impl fmt::Display for AnchorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arg in &self.positional {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{arg}")?;
        }
        for (name, value) in &self.named {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// Build an [`AnchorPath`].
///
/// Positional components come first, named components follow a `;`.
///
/// ```
/// use solid_types::anchor_path;
///
/// let empty = anchor_path!();
/// assert!(empty.is_empty());
///
/// let edge = anchor_path!("face_edge", 1, 0; t = 0.25, d = 1.0);
/// assert_eq!(edge.positional().len(), 3);
/// assert_eq!(edge.named_args().len(), 2);
/// ```
#[macro_export]
macro_rules! anchor_path {
    () => {
        $crate::AnchorPath::new()
    };
    ($($arg:expr),* ; $($key:ident = $value:expr),+ $(,)?) => {
        $crate::AnchorPath::new()
            $(.arg($arg))*
            $(.with(stringify!($key), $value))+
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::AnchorPath::new()$(.arg($arg))+
    };
}
