//! One scoring term.

use ua_core::{Parameter, Params, Tag};

use crate::Curve;

/// The raw input range mapped onto the curve's `[0, 1]` domain.
///
/// Values outside the range are not clamped: `normalize` extrapolates, and
/// the final clamp happens after the curve.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bookends {
    pub min: f32,
    pub max: f32,
}

impl Bookends {
    pub const UNIT: Bookends = Bookends { min: 0.0, max: 1.0 };

    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `(raw − min) / (max − min)`.  A zero-width range acts as a threshold:
    /// `0` below `min`, `1` at or above it.
    pub fn normalize(self, raw: f32) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 {
            return if raw < self.min { 0.0 } else { 1.0 };
        }
        (raw - self.min) / span
    }
}

impl Default for Bookends {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Input tag + parameters, bookends, and a curve.  Stateless; one instance
/// is shared by every brain whose action definitions include it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consideration {
    pub input:    Tag,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params:   Params,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bookends: Bookends,
    #[cfg_attr(feature = "serde", serde(default))]
    pub curve:    Curve,
}

impl Consideration {
    /// Identity curve over unit bookends.
    pub fn new(input: impl Into<Tag>) -> Self {
        Self {
            input:    input.into(),
            params:   Params::new(),
            bookends: Bookends::UNIT,
            curve:    Curve::default(),
        }
    }

    pub fn bookends(mut self, min: f32, max: f32) -> Self {
        self.bookends = Bookends::new(min, max);
        self
    }

    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Add a literal parameter.
    pub fn param(mut self, name: impl Into<Tag>, value: f32) -> Self {
        self.params.insert(name.into(), Parameter::Literal(value));
        self
    }

    /// Add a parameter resolved from another input at evaluation time.
    pub fn param_input(mut self, name: impl Into<Tag>, input: impl Into<Tag>) -> Self {
        self.params.insert(name.into(), Parameter::Input(input.into()));
        self
    }
}
