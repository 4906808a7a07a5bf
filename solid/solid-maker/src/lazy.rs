//! Shapes whose construction waits for a length.
//!
//! `add_between` only knows how long the spanning shape must be once both
//! targets are resolved, so it takes a factory instead of a built shape.

use std::fmt;
use std::sync::Arc;

use solid_types::{Attributes, CompositionMode, ShapeName};

use crate::error::MakerResult;
use crate::named::{NamedShape, WithAttributes};
use crate::shape::Shape;

type Factory = dyn Fn(f64) -> MakerResult<Arc<dyn Shape>> + Send + Sync;

/// A factory building a shape from a length.
#[derive(Clone)]
pub struct LazyShape {
    factory: Arc<Factory>,
}

impl fmt::Debug for LazyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyShape").finish_non_exhaustive()
    }
}

impl LazyShape {
    /// Wrap a factory.
    ///
    /// # Example
    ///
    /// ```
    /// use solid_maker::{LazyShape, MakerResult, Shape};
    /// use solid_types::{AnchorPath, Frame};
    ///
    /// #[derive(Debug)]
    /// struct Rod(f64);
    /// impl Shape for Rod {
    ///     fn type_name(&self) -> &str { "Rod" }
    ///     fn anchor(&self, _: &AnchorPath) -> MakerResult<Frame> { Ok(Frame::identity()) }
    ///     fn anchor_names(&self) -> Vec<String> { Vec::new() }
    /// }
    ///
    /// let lazy = LazyShape::new(|len| Ok(Rod(len)));
    /// let rod = lazy.build(4.0).unwrap();
    /// assert_eq!(rod.type_name(), "Rod");
    /// ```
    pub fn new<S, F>(factory: F) -> Self
    where
        S: Shape + 'static,
        F: Fn(f64) -> MakerResult<S> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(move |length| {
                factory(length).map(|s| Arc::new(s) as Arc<dyn Shape>)
            }),
        }
    }

    /// Build the shape for `length`.
    ///
    /// # Errors
    ///
    /// Returns whatever the factory returns.
    pub fn build(&self, length: f64) -> MakerResult<Arc<dyn Shape>> {
        (self.factory)(length)
    }

    /// Tag with a mode and name.
    pub fn named(self, mode: CompositionMode, name: impl Into<ShapeName>) -> LazyNamedShape {
        LazyNamedShape {
            lazy: self,
            mode,
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    /// Tag as a solid.
    pub fn solid(self, name: impl Into<ShapeName>) -> LazyNamedShape {
        self.named(CompositionMode::Solid, name)
    }

    /// Tag as a hole.
    pub fn hole(self, name: impl Into<ShapeName>) -> LazyNamedShape {
        self.named(CompositionMode::Hole, name)
    }

    /// Tag as a cage.
    pub fn cage(self, name: impl Into<ShapeName>) -> LazyNamedShape {
        self.named(CompositionMode::Cage, name)
    }

    /// Tag as a composite.
    pub fn composite(self, name: impl Into<ShapeName>) -> LazyNamedShape {
        self.named(CompositionMode::Composite, name)
    }
}

/// A [`LazyShape`] with a mode, name and attributes.
#[derive(Debug, Clone)]
pub struct LazyNamedShape {
    lazy: LazyShape,
    mode: CompositionMode,
    name: ShapeName,
    attributes: Attributes,
}

impl WithAttributes for LazyNamedShape {
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl LazyNamedShape {
    /// The factory.
    #[must_use]
    pub const fn lazy(&self) -> &LazyShape {
        &self.lazy
    }

    /// The composition mode.
    #[must_use]
    pub const fn mode(&self) -> CompositionMode {
        self.mode
    }

    /// The entry name.
    #[must_use]
    pub const fn name(&self) -> &ShapeName {
        &self.name
    }

    /// Build for `length`.
    ///
    /// # Errors
    ///
    /// Returns whatever the factory returns.
    pub fn build(&self, length: f64) -> MakerResult<Arc<dyn Shape>> {
        self.lazy.build(length)
    }

    /// Pair a built shape with this mode, name and attributes.
    #[must_use]
    pub fn to_named_shape(&self, shape: Arc<dyn Shape>) -> NamedShape {
        NamedShape::new(shape, self.mode, self.name.clone()).with_attributes(self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MakerError;
    use solid_types::{AnchorPath, Colour, Frame};

    #[derive(Debug)]
    struct Rod {
        len: f64,
    }

    impl Shape for Rod {
        fn type_name(&self) -> &str {
            "Rod"
        }

        fn anchor(&self, _: &AnchorPath) -> MakerResult<Frame> {
            Ok(Frame::translation(0.0, 0.0, self.len))
        }

        fn anchor_names(&self) -> Vec<String> {
            Vec::new()
        }
    }

    fn rods() -> LazyShape {
        LazyShape::new(|len| {
            if len < 0.0 {
                return Err(MakerError::InvalidParameter {
                    shape: "Rod".into(),
                    reason: format!("negative length {len}"),
                });
            }
            Ok(Rod { len })
        })
    }

    #[test]
    fn test_build_passes_length() {
        let rod = rods().build(3.0).unwrap();
        let f = rod.anchor(&AnchorPath::new()).unwrap();
        assert_eq!(f, Frame::translation(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_build_propagates_error() {
        assert!(matches!(
            rods().build(-1.0),
            Err(MakerError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_named_carries_attributes() {
        let lazy = rods().hole("bore").colour([1.0, 0.0, 0.0]).segments(12);
        let named = lazy.to_named_shape(lazy.build(1.0).unwrap());
        assert_eq!(named.mode(), CompositionMode::Hole);
        assert_eq!(named.name(), &ShapeName::from("bore"));
        assert_eq!(named.attributes().colour, Some(Colour::rgb(1.0, 0.0, 0.0)));
        assert_eq!(named.attributes().segments, Some(12));
    }
}
