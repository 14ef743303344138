//! Named custom curves.

use std::sync::Arc;

use ua_core::{MissLog, Tag, TagMap, UaError, UaResult};

/// A curve asset without a closed form.  Receives the normalized input.
pub trait CustomCurve: Send + Sync + 'static {
    fn sample(&self, x: f32) -> f32;
}

impl<F> CustomCurve for F
where
    F: Fn(f32) -> f32 + Send + Sync + 'static,
{
    fn sample(&self, x: f32) -> f32 {
        self(x)
    }
}

// ── KeyframeCurve ─────────────────────────────────────────────────────────────

/// Piecewise-linear curve through `(x, y)` keys.
///
/// Inputs before the first key or after the last return that key's `y`.
/// An empty curve samples to `0`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyframeCurve {
    keys: Vec<(f32, f32)>,
}

impl KeyframeCurve {
    /// Keys are sorted by `x`; NaN keys are discarded.
    pub fn new(mut keys: Vec<(f32, f32)>) -> Self {
        keys.retain(|(x, y)| !x.is_nan() && !y.is_nan());
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    pub fn keys(&self) -> &[(f32, f32)] {
        &self.keys
    }
}

impl CustomCurve for KeyframeCurve {
    fn sample(&self, x: f32) -> f32 {
        let (Some(&first), Some(&last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }
        // First key strictly greater than x; x > first.0 so idx >= 1.
        let idx = self.keys.partition_point(|&(kx, _)| kx <= x);
        let (x0, y0) = self.keys[idx - 1];
        let (x1, y1) = self.keys[idx];
        let span = x1 - x0;
        if span <= 0.0 {
            return y1;
        }
        y0 + (y1 - y0) * ((x - x0) / span)
    }
}

// ── CurveLibrary ──────────────────────────────────────────────────────────────

/// Registry of custom curves keyed by tag.  Populated once at startup.
#[derive(Default)]
pub struct CurveLibrary {
    curves: TagMap<Arc<dyn CustomCurve>>,
    misses: MissLog,
}

impl CurveLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tag: impl Into<Tag>, curve: impl CustomCurve) -> UaResult<()> {
        let tag = tag.into();
        if self.curves.contains_key(&tag) {
            return Err(UaError::DuplicateProvider { kind: "curve", tag });
        }
        self.curves.insert(tag, Arc::new(curve));
        Ok(())
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.curves.contains_key(tag)
    }

    /// Sample curve `tag` at `x`.  An unknown tag warns once and yields `0`.
    pub fn sample(&self, tag: &Tag, x: f32) -> f32 {
        match self.curves.get(tag) {
            Some(curve) => curve.sample(x),
            None => {
                if self.misses.first_miss(tag) {
                    tracing::warn!(%tag, "no custom curve registered; scoring 0");
                }
                0.0
            }
        }
    }
}
