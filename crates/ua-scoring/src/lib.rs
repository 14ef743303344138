//! `ua-scoring` — turns raw inputs into a utility score.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                     |
//! |-------------------|--------------------------------------------------------------|
//! | [`curve`]         | `ResponseCurve`, `CurveParams`, `Curve`                      |
//! | [`custom`]        | `CustomCurve` trait, `KeyframeCurve`, `CurveLibrary`         |
//! | [`input`]         | `InputProvider` trait, `InputRegistry`, `resolve_params`     |
//! | [`consideration`] | `Consideration`, `Bookends`                                  |
//! | [`score`]         | `ScoringEnv`, `score_consideration`, `score_context`         |
//!
//! # Pipeline
//!
//! ```text
//! params ──resolve──▶ InputProvider ──raw──▶ bookends ──x──▶ curve ──clamp──▶ term
//! score(action, context) = weight × Π term_i      (stops once the product hits 0)
//! ```

pub mod consideration;
pub mod curve;
pub mod custom;
pub mod input;
pub mod score;


pub use consideration::{Bookends, Consideration};
pub use curve::{Curve, CurveParams, ResponseCurve};
pub use custom::{CurveLibrary, CustomCurve, KeyframeCurve};
pub use input::{InputProvider, InputRegistry, resolve_params};
pub use score::{SCORE_EPSILON, ScoringEnv, score_consideration, score_context};
