//! Consideration and context scoring.

use ua_agent::WorldView;
use ua_core::{Context, ParamValues, Tag};
use ua_pool::ResourcePool;

use crate::{Consideration, Curve, CurveLibrary, InputRegistry, resolve_params};

/// Scores at or below this are treated as zero.
pub const SCORE_EPSILON: f32 = 1e-6;

/// Everything a scoring pass reads.  Cheap to copy; built once per update.
#[derive(Copy, Clone)]
pub struct ScoringEnv<'a> {
    pub view:   WorldView<'a>,
    pub inputs: &'a InputRegistry,
    pub curves: &'a CurveLibrary,
    pub pool:   &'a ResourcePool,
}

/// Score one consideration for `ctx`, clamped to `[0, 1]`.
///
/// NaN (e.g. a fractional power of a negative base) scores `0`.
pub fn score_consideration(c: &Consideration, ctx: &Context, env: &ScoringEnv<'_>) -> f32 {
    let raw = if c.params.is_empty() {
        env.inputs.evaluate(&c.input, ctx, &env.view, ParamValues::EMPTY)
    } else {
        let mut resolved = env.pool.reserve::<(Tag, f32)>();
        resolve_params(&c.params, ctx, &env.view, env.inputs, &mut resolved);
        env.inputs.evaluate(&c.input, ctx, &env.view, ParamValues::new(&resolved))
    };

    let x = c.bookends.normalize(raw);
    let y = match &c.curve {
        Curve::Builtin { shape, params } => shape.evaluate(x, params),
        Curve::Custom(tag) => env.curves.sample(tag, x),
    };

    if y.is_nan() { 0.0 } else { y.clamp(0.0, 1.0) }
}

/// `weight × Π considerations`, evaluated in list order.
///
/// Every term lies in `[0, 1]`, so the running product never grows; once it
/// is at or below [`SCORE_EPSILON`] the remaining terms are skipped and the
/// result is `0`.
pub fn score_context(
    weight:         f32,
    considerations: &[Consideration],
    ctx:            &Context,
    env:            &ScoringEnv<'_>,
) -> f32 {
    let mut acc = weight;
    for c in considerations {
        if acc <= SCORE_EPSILON {
            return 0.0;
        }
        acc *= score_consideration(c, ctx, env);
    }
    if acc <= SCORE_EPSILON { 0.0 } else { acc }
}
