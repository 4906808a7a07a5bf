//! Per-shape anchor tables.
//!
//! A shape type declares its anchors once, as a static [`AnchorTable`] of
//! named functions. Resolving a path looks the head name up in the table and
//! hands the remaining components to the function as [`AnchorArgs`].
//!
//! # Example
//!
//! ```
//! use solid_maker::{AnchorArgs, AnchorDef, AnchorTable, MakerResult};
//! use solid_types::{Frame, anchor_path};
//!
//! struct Rod {
//!     length: f64,
//! }
//!
//! fn tip(rod: &Rod, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
//!     args.expect(&["t"])?;
//!     let t = args.f64(0, "t", 1.0)?;
//!     Ok(Frame::translation(0.0, 0.0, rod.length * t))
//! }
//!
//! static ROD_ANCHORS: AnchorTable<Rod> = AnchorTable::new(
//!     "Rod",
//!     &[AnchorDef::new("tip", "Point along the rod axis.", tip)],
//! );
//!
//! let rod = Rod { length: 4.0 };
//! let f = ROD_ANCHORS.resolve(&rod, &anchor_path!("tip", 0.5)).unwrap();
//! assert_eq!(f, Frame::translation(0.0, 0.0, 2.0));
//! assert!(ROD_ANCHORS.resolve(&rod, &anchor_path!("base")).is_err());
//! ```

use std::collections::BTreeMap;

use solid_types::{AnchorArg, AnchorPath, Frame, Vector3};

use crate::error::{MakerError, MakerResult};

/// Arguments passed to an anchor function.
///
/// Parameters are looked up by position first, then by name, then fall back
/// to a default.
#[derive(Debug, Clone, Copy)]
pub struct AnchorArgs<'a> {
    shape: &'a str,
    anchor: &'a str,
    positional: &'a [AnchorArg],
    named: &'a BTreeMap<String, AnchorArg>,
}

impl<'a> AnchorArgs<'a> {
    /// Arguments of `path` after its head, for anchor `anchor` on `shape`.
    #[must_use]
    pub fn new(shape: &'a str, anchor: &'a str, path: &'a AnchorPath) -> Self {
        Self {
            shape,
            anchor,
            positional: path.positional().get(1..).unwrap_or(&[]),
            named: path.named_args(),
        }
    }

    /// An [`MakerError::InvalidAnchorArgs`] for this anchor.
    #[must_use]
    pub fn error(&self, reason: impl Into<String>) -> MakerError {
        MakerError::InvalidAnchorArgs {
            shape: self.shape.to_string(),
            anchor: self.anchor.to_string(),
            reason: reason.into(),
        }
    }

    /// Check that at most `params.len()` positional arguments are given and
    /// that every named argument is one of `params` and not also given by position.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::InvalidAnchorArgs`] on surplus or unknown arguments.
    pub fn expect(&self, params: &[&str]) -> MakerResult<()> {
        if self.positional.len() > params.len() {
            return Err(self.error(format!(
                "expected at most {} positional arguments, got {}",
                params.len(),
                self.positional.len()
            )));
        }
        for name in self.named.keys() {
            match params.iter().position(|p| *p == name.as_str()) {
                None => return Err(self.error(format!("unexpected argument '{name}'"))),
                Some(i) if i < self.positional.len() => {
                    return Err(self.error(format!("argument '{name}' given twice")));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn lookup(&self, index: usize, name: &str) -> Option<&'a AnchorArg> {
        self.positional.get(index).or_else(|| self.named.get(name))
    }

    /// The raw argument at `index` or named `name`, for parameters that
    /// accept more than one kind of value.
    #[must_use]
    pub fn arg(&self, index: usize, name: &str) -> Option<&'a AnchorArg> {
        self.lookup(index, name)
    }

    /// An [`MakerError::InvalidAnchorArgs`] for an argument of the wrong kind.
    #[must_use]
    pub fn type_error(&self, name: &str, wanted: &str, got: &AnchorArg) -> MakerError {
        self.mismatch(name, wanted, got)
    }

    fn mismatch(&self, name: &str, wanted: &str, got: &AnchorArg) -> MakerError {
        self.error(format!(
            "argument '{name}' must be {wanted}, got {} {got}",
            got.kind()
        ))
    }

    /// An optional real parameter.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::InvalidAnchorArgs`] if the value is not a number.
    pub fn opt_f64(&self, index: usize, name: &str) -> MakerResult<Option<f64>> {
        self.lookup(index, name)
            .map(|arg| arg.as_f64().ok_or_else(|| self.mismatch(name, "a number", arg)))
            .transpose()
    }

    /// A real parameter with a default.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::InvalidAnchorArgs`] if the value is not a number.
    pub fn f64(&self, index: usize, name: &str, default: f64) -> MakerResult<f64> {
        Ok(self.opt_f64(index, name)?.unwrap_or(default))
    }

    /// An optional integer parameter.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::InvalidAnchorArgs`] if the value is not an integer.
    pub fn opt_int(&self, index: usize, name: &str) -> MakerResult<Option<i64>> {
        self.lookup(index, name)
            .map(|arg| arg.as_int().ok_or_else(|| self.mismatch(name, "an integer", arg)))
            .transpose()
    }

    /// A required integer parameter.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::InvalidAnchorArgs`] if the value is missing or not an integer.
    pub fn int(&self, index: usize, name: &str) -> MakerResult<i64> {
        self.opt_int(index, name)?
            .ok_or_else(|| self.error(format!("missing argument '{name}'")))
    }

    /// A boolean parameter with a default.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::InvalidAnchorArgs`] if the value is not a boolean.
    pub fn bool(&self, index: usize, name: &str, default: bool) -> MakerResult<bool> {
        self.lookup(index, name)
            .map(|arg| arg.as_bool().ok_or_else(|| self.mismatch(name, "a bool", arg)))
            .transpose()
            .map(|v| v.unwrap_or(default))
    }

    /// An optional vector parameter.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::InvalidAnchorArgs`] if the value is not a vector.
    pub fn opt_vector(&self, index: usize, name: &str) -> MakerResult<Option<Vector3<f64>>> {
        self.lookup(index, name)
            .map(|arg| arg.as_vector().ok_or_else(|| self.mismatch(name, "a vector", arg)))
            .transpose()
    }
}

/// Signature of an anchor function for shape type `S`.
pub type AnchorFn<S> = fn(&S, &AnchorArgs<'_>) -> MakerResult<Frame>;

/// One named anchor of a shape type.
pub struct AnchorDef<S: 'static> {
    /// Anchor name, matched against the head of a path.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Resolver.
    pub func: AnchorFn<S>,
}

impl<S: 'static> AnchorDef<S> {
    /// Define an anchor.
    #[must_use]
    pub const fn new(name: &'static str, description: &'static str, func: AnchorFn<S>) -> Self {
        Self {
            name,
            description,
            func,
        }
    }
}

/// The anchors of a shape type.
pub struct AnchorTable<S: 'static> {
    shape: &'static str,
    anchors: &'static [AnchorDef<S>],
}

impl<S: 'static> AnchorTable<S> {
    /// Define a table for the type named `shape`.
    #[must_use]
    pub const fn new(shape: &'static str, anchors: &'static [AnchorDef<S>]) -> Self {
        Self { shape, anchors }
    }

    /// Type name of the shape.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        self.shape
    }

    /// Anchor names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.anchors.iter().map(|a| a.name).collect()
    }

    /// Whether `name` is an anchor of this type.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look up an anchor definition.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnchorDef<S>> {
        self.anchors.iter().find(|a| a.name == name)
    }

    /// `(name, description)` pairs in declaration order.
    #[must_use]
    pub fn describe(&self) -> Vec<(&'static str, &'static str)> {
        self.anchors.iter().map(|a| (a.name, a.description)).collect()
    }

    fn unknown(&self, anchor: String) -> MakerError {
        MakerError::UnknownAnchor {
            shape: self.shape.to_string(),
            anchor,
            available: self.anchors.iter().map(|a| a.name.to_string()).collect(),
        }
    }

    /// Resolve `path` against `shape`.
    ///
    /// The empty path resolves to the identity.
    ///
    /// # Errors
    ///
    /// Returns [`MakerError::UnknownAnchor`] if the head is not an anchor name,
    /// or whatever the anchor function returns.
    pub fn resolve(&self, shape: &S, path: &AnchorPath) -> MakerResult<Frame> {
        let Some(head) = path.head() else {
            if path.is_empty() {
                return Ok(Frame::identity());
            }
            return Err(self.unknown(String::new()));
        };
        let Some(name) = head.as_str() else {
            return Err(self.unknown(head.to_string()));
        };
        let def = self.get(name).ok_or_else(|| self.unknown(name.to_string()))?;
        (def.func)(shape, &AnchorArgs::new(self.shape, name, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solid_types::anchor_path;

    struct Slab {
        depth: f64,
    }

    fn surface(slab: &Slab, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
        args.expect(&["t", "flip"])?;
        let t = args.f64(0, "t", 0.5)?;
        let frame = Frame::translation(0.0, 0.0, slab.depth * t);
        if args.bool(1, "flip", false)? {
            return Ok(frame * Frame::rotation_x(180.0));
        }
        Ok(frame)
    }

    fn corner(_: &Slab, args: &AnchorArgs<'_>) -> MakerResult<Frame> {
        args.expect(&["index"])?;
        #[allow(clippy::cast_precision_loss)]
        let x = args.int(0, "index")? as f64;
        Ok(Frame::translation(x, 0.0, 0.0))
    }

    static SLAB_ANCHORS: AnchorTable<Slab> = AnchorTable::new(
        "Slab",
        &[
            AnchorDef::new("surface", "Point through the slab.", surface),
            AnchorDef::new("corner", "Indexed corner.", corner),
        ],
    );

    #[test]
    fn test_positional_and_named_args() {
        let slab = Slab { depth: 4.0 };
        let by_pos = SLAB_ANCHORS.resolve(&slab, &anchor_path!("surface", 0.25)).unwrap();
        let by_name = SLAB_ANCHORS
            .resolve(&slab, &anchor_path!("surface"; t = 0.25))
            .unwrap();
        assert_eq!(by_pos, by_name);
        assert_eq!(by_pos, Frame::translation(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_defaults_apply() {
        let slab = Slab { depth: 4.0 };
        let f = SLAB_ANCHORS.resolve(&slab, &anchor_path!("surface")).unwrap();
        assert_eq!(f, Frame::translation(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_parameters_extrapolate() {
        let slab = Slab { depth: 4.0 };
        let f = SLAB_ANCHORS.resolve(&slab, &anchor_path!("surface", 1.5)).unwrap();
        assert_eq!(f, Frame::translation(0.0, 0.0, 6.0));
    }

    #[test]
    fn test_empty_path_is_identity() {
        let slab = Slab { depth: 1.0 };
        assert!(SLAB_ANCHORS.resolve(&slab, &anchor_path!()).unwrap().is_identity());
    }

    #[test]
    fn test_unknown_anchor_lists_available() {
        let slab = Slab { depth: 1.0 };
        let err = SLAB_ANCHORS.resolve(&slab, &anchor_path!("edge")).unwrap_err();
        match err {
            MakerError::UnknownAnchor {
                shape,
                anchor,
                available,
            } => {
                assert_eq!(shape, "Slab");
                assert_eq!(anchor, "edge");
                assert_eq!(available, vec!["surface", "corner"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_non_text_head_is_unknown() {
        let slab = Slab { depth: 1.0 };
        let result = SLAB_ANCHORS.resolve(&slab, &anchor_path!(3));
        assert!(matches!(result, Err(MakerError::UnknownAnchor { .. })));
    }

    #[test]
    fn test_wrong_type_fails() {
        let slab = Slab { depth: 1.0 };
        let result = SLAB_ANCHORS.resolve(&slab, &anchor_path!("surface", "half"));
        assert!(matches!(result, Err(MakerError::InvalidAnchorArgs { .. })));
    }

    #[test]
    fn test_surplus_and_unknown_args_fail() {
        let slab = Slab { depth: 1.0 };
        let surplus = SLAB_ANCHORS.resolve(&slab, &anchor_path!("surface", 0.1, true, 3));
        assert!(matches!(surplus, Err(MakerError::InvalidAnchorArgs { .. })));

        let unknown = SLAB_ANCHORS.resolve(&slab, &anchor_path!("surface"; depth = 1.0));
        assert!(matches!(unknown, Err(MakerError::InvalidAnchorArgs { .. })));

        let twice = SLAB_ANCHORS.resolve(&slab, &anchor_path!("surface", 0.1; t = 0.2));
        assert!(matches!(twice, Err(MakerError::InvalidAnchorArgs { .. })));
    }

    #[test]
    fn test_missing_required_fails() {
        let slab = Slab { depth: 1.0 };
        let err = SLAB_ANCHORS.resolve(&slab, &anchor_path!("corner")).unwrap_err();
        assert!(err.to_string().contains("missing argument 'index'"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(SLAB_ANCHORS.names(), vec!["surface", "corner"]);
        assert_eq!(SLAB_ANCHORS.describe()[1], ("corner", "Indexed corner."));
        assert!(SLAB_ANCHORS.contains("corner"));
        assert!(!SLAB_ANCHORS.contains("centre"));
        assert_eq!(SLAB_ANCHORS.shape(), "Slab");
    }
}
