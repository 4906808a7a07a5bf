//! Render attributes inherited down a composition.
//!
//! Every field is optional. A child's set fields override its parent's
//! ([`Attributes::merge`]), and only the fields that changed relative to the
//! parent are emitted ([`Attributes::diff`]).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Colour {
    /// Red, green, blue and alpha components.
    pub rgba: [f64; 4],
}

impl Colour {
    /// An opaque colour.
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            rgba: [r, g, b, 1.0],
        }
    }

    /// A colour with alpha.
    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { rgba: [r, g, b, a] }
    }

    /// The alpha component.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.rgba[3]
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.rgba;
        write!(f, "[{r}, {g}, {b}, {a}]")
    }
}

impl From<[f64; 3]> for Colour {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<[f64; 4]> for Colour {
    fn from(rgba: [f64; 4]) -> Self {
        Self { rgba }
    }
}

/// Render attributes attached to a composition entry.
///
/// # Example
///
/// ```
/// use solid_types::{Attributes, Colour};
///
/// let parent = Attributes::new().with_colour(Colour::rgb(1.0, 0.0, 0.0));
/// let child = Attributes::new().with_segments(32);
///
/// let merged = parent.merge(&child);
/// assert_eq!(merged.colour, Some(Colour::rgb(1.0, 0.0, 0.0)));
///
/// // Only the segment count changed.
/// let diff = parent.diff(&merged);
/// assert_eq!(diff.colour, None);
/// assert_eq!(diff.segments, Some(32));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attributes {
    /// Colour.
    pub colour: Option<Colour>,
    /// Fixed number of segments for curved surfaces (`$fn`).
    pub segments: Option<u32>,
    /// Minimum angle per segment in degrees (`$fa`).
    pub min_angle: Option<f64>,
    /// Minimum segment length (`$fs`).
    pub min_size: Option<f64>,
    /// Exclude the subtree from the model.
    pub disable: Option<bool>,
    /// Show only this subtree.
    pub show_only: Option<bool>,
    /// Highlight the subtree.
    pub debug: Option<bool>,
    /// Render the subtree transparent.
    pub transparent: Option<bool>,
    /// Emit curved shapes as explicit polyhedra where the shape supports it.
    pub use_polyhedrons: Option<bool>,
}

impl Attributes {
    /// Attributes with no fields set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            colour: None,
            segments: None,
            min_angle: None,
            min_size: None,
            disable: None,
            show_only: None,
            debug: None,
            transparent: None,
            use_polyhedrons: None,
        }
    }

    /// Set the colour.
    #[must_use]
    pub fn with_colour(mut self, colour: impl Into<Colour>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    /// Set the segment count.
    #[must_use]
    pub const fn with_segments(mut self, segments: u32) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Set the minimum angle.
    #[must_use]
    pub const fn with_min_angle(mut self, degrees: f64) -> Self {
        self.min_angle = Some(degrees);
        self
    }

    /// Set the minimum segment size.
    #[must_use]
    pub const fn with_min_size(mut self, size: f64) -> Self {
        self.min_size = Some(size);
        self
    }

    /// Set the disable flag.
    #[must_use]
    pub const fn with_disable(mut self, disable: bool) -> Self {
        self.disable = Some(disable);
        self
    }

    /// Set the show-only flag.
    #[must_use]
    pub const fn with_show_only(mut self, show_only: bool) -> Self {
        self.show_only = Some(show_only);
        self
    }

    /// Set the debug flag.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Set the transparent flag.
    #[must_use]
    pub const fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = Some(transparent);
        self
    }

    /// Set the polyhedron output flag.
    #[must_use]
    pub const fn with_use_polyhedrons(mut self, use_polyhedrons: bool) -> Self {
        self.use_polyhedrons = Some(use_polyhedrons);
        self
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }

    /// Overlay `child` on `self`: set fields of `child` win.
    #[must_use]
    pub fn merge(&self, child: &Self) -> Self {
        Self {
            colour: child.colour.or(self.colour),
            segments: child.segments.or(self.segments),
            min_angle: child.min_angle.or(self.min_angle),
            min_size: child.min_size.or(self.min_size),
            disable: child.disable.or(self.disable),
            show_only: child.show_only.or(self.show_only),
            debug: child.debug.or(self.debug),
            transparent: child.transparent.or(self.transparent),
            use_polyhedrons: child.use_polyhedrons.or(self.use_polyhedrons),
        }
    }

    /// Fields of `merged` that differ from `self`; equal fields are unset.
    #[must_use]
    pub fn diff(&self, merged: &Self) -> Self {
        fn changed<T: PartialEq + Copy>(parent: Option<T>, merged: Option<T>) -> Option<T> {
            if parent == merged { None } else { merged }
        }

        Self {
            colour: changed(self.colour, merged.colour),
            segments: changed(self.segments, merged.segments),
            min_angle: changed(self.min_angle, merged.min_angle),
            min_size: changed(self.min_size, merged.min_size),
            disable: changed(self.disable, merged.disable),
            show_only: changed(self.show_only, merged.show_only),
            debug: changed(self.debug, merged.debug),
            transparent: changed(self.transparent, merged.transparent),
            use_polyhedrons: changed(self.use_polyhedrons, merged.use_polyhedrons),
        }
    }
}
