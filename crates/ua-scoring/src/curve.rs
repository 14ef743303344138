//! Closed-form response curves.
//!
//! Each shape maps a normalized input to an output using four parameters
//! `(m, k, b, c)`:
//!
//! | Shape         | Formula                                          |
//! |---------------|--------------------------------------------------|
//! | `Step`        | `floor((x − c) · m · 2) + b`                     |
//! | `Linear`      | `m · (x − c) + b`                                |
//! | `Quadratic`   | `m · (x − c)^k + b`                              |
//! | `Exponential` | `m^(k·x − c) + b`                                |
//! | `Logistic`    | `k · 1 / (1 + (1000·e·m)^(−x + c)) + b`          |
//!
//! Evaluation never clamps; [`score_consideration`][crate::score_consideration]
//! owns range semantics.

use std::f32::consts::E;

use ua_core::Tag;

/// Curve parameters.  Which ones matter depends on the shape.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveParams {
    pub m: f32,
    pub k: f32,
    pub b: f32,
    pub c: f32,
}

impl CurveParams {
    #[inline]
    pub const fn new(m: f32, k: f32, b: f32, c: f32) -> Self {
        Self { m, k, b, c }
    }
}

impl Default for CurveParams {
    /// Identity line: `1 · (x − 0) + 0`.
    fn default() -> Self {
        Self { m: 1.0, k: 1.0, b: 0.0, c: 0.0 }
    }
}

/// Built-in curve shapes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseCurve {
    Step,
    Linear,
    Quadratic,
    Exponential,
    Logistic,
}

impl ResponseCurve {
    pub fn evaluate(self, x: f32, p: &CurveParams) -> f32 {
        let CurveParams { m, k, b, c } = *p;
        match self {
            ResponseCurve::Step        => ((x - c) * m * 2.0).floor() + b,
            ResponseCurve::Linear      => m * (x - c) + b,
            ResponseCurve::Quadratic   => m * (x - c).powf(k) + b,
            ResponseCurve::Exponential => m.powf(k * x - c) + b,
            ResponseCurve::Logistic    => k * (1.0 / (1.0 + (1000.0 * E * m).powf(-x + c))) + b,
        }
    }
}

/// A consideration's curve: a built-in shape, or a named custom curve
/// looked up in the [`CurveLibrary`][crate::CurveLibrary].
///
/// Custom curves have no closed form, so they are a separate variant rather
/// than a `ResponseCurve`; [`ResponseCurve::evaluate`] cannot be handed one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    Builtin { shape: ResponseCurve, params: CurveParams },
    Custom(Tag),
}

impl Curve {
    pub fn builtin(shape: ResponseCurve, m: f32, k: f32, b: f32, c: f32) -> Self {
        Curve::Builtin { shape, params: CurveParams::new(m, k, b, c) }
    }

    pub fn linear(m: f32, b: f32) -> Self {
        Self::builtin(ResponseCurve::Linear, m, 0.0, b, 0.0)
    }

    /// `1 − x`: closer / smaller is better.
    pub fn inverse_linear() -> Self {
        Self::linear(-1.0, 1.0)
    }

    pub fn custom(tag: impl Into<Tag>) -> Self {
        Curve::Custom(tag.into())
    }
}

impl Default for Curve {
    fn default() -> Self {
        Curve::Builtin { shape: ResponseCurve::Linear, params: CurveParams::default() }
    }
}
