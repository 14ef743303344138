//! Input providers: the engine's window onto world information.
//!
//! An input maps a [`Context`] plus resolved parameters to one float
//! (a distance, a health fraction, a cooldown remaining…).  Providers are
//! registered once under a tag and must be pure: the same context,
//! parameters and world state always give the same value.

use std::sync::Arc;

use ua_agent::WorldView;
use ua_core::{Context, MissLog, ParamValues, Parameter, Params, Tag, TagMap, UaError, UaResult};

/// Computes one named input.
///
/// Closures of the right shape implement this trait; register them with
/// [`InputRegistry::register_fn`] so their signature is inferred:
///
/// ```rust
/// use ua_scoring::InputRegistry;
///
/// let mut inputs = InputRegistry::new(0.0);
/// inputs
///     .register_fn("Constant", |_ctx, _view, params| params.get_or("Value", 1.0))
///     .unwrap();
/// assert_eq!(inputs.len(), 1);
/// ```
pub trait InputProvider: Send + Sync + 'static {
    fn evaluate(&self, ctx: &Context, view: &WorldView<'_>, params: ParamValues<'_>) -> f32;
}

impl<F> InputProvider for F
where
    F: Fn(&Context, &WorldView<'_>, ParamValues<'_>) -> f32 + Send + Sync + 'static,
{
    fn evaluate(&self, ctx: &Context, view: &WorldView<'_>, params: ParamValues<'_>) -> f32 {
        self(ctx, view, params)
    }
}

/// Tag → provider table.
pub struct InputRegistry {
    providers:       TagMap<Arc<dyn InputProvider>>,
    missing_default: f32,
    misses:          MissLog,
}

impl InputRegistry {
    /// `missing_default` is what an unregistered tag evaluates to.
    pub fn new(missing_default: f32) -> Self {
        Self {
            providers: TagMap::default(),
            missing_default,
            misses: MissLog::new(),
        }
    }

    pub fn register(&mut self, tag: impl Into<Tag>, provider: impl InputProvider) -> UaResult<()> {
        self.register_shared(tag, Arc::new(provider))
    }

    /// Register a closure input.
    pub fn register_fn<F>(&mut self, tag: impl Into<Tag>, f: F) -> UaResult<()>
    where
        F: Fn(&Context, &WorldView<'_>, ParamValues<'_>) -> f32 + Send + Sync + 'static,
    {
        self.register_shared(tag, Arc::new(f))
    }

    /// Register a provider that is also held elsewhere.
    pub fn register_shared(
        &mut self,
        tag:      impl Into<Tag>,
        provider: Arc<dyn InputProvider>,
    ) -> UaResult<()> {
        let tag = tag.into();
        if self.providers.contains_key(&tag) {
            return Err(UaError::DuplicateProvider { kind: "input", tag });
        }
        self.providers.insert(tag, provider);
        Ok(())
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.providers.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Evaluate input `tag`.  Unknown tags warn once and yield the
    /// registry's default so sibling actions keep scoring.
    pub fn evaluate(
        &self,
        tag:    &Tag,
        ctx:    &Context,
        view:   &WorldView<'_>,
        params: ParamValues<'_>,
    ) -> f32 {
        match self.providers.get(tag) {
            Some(provider) => provider.evaluate(ctx, view, params),
            None => {
                if self.misses.first_miss(tag) {
                    tracing::warn!(%tag, default = self.missing_default, "no input provider registered");
                }
                self.missing_default
            }
        }
    }
}

impl Default for InputRegistry {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Resolve `params` against `ctx` into `out` (cleared first).
///
/// Literals are copied; `Parameter::Input` references are evaluated with no
/// parameters of their own.  Output order follows `Params` key order.
pub fn resolve_params(
    params: &Params,
    ctx:    &Context,
    view:   &WorldView<'_>,
    inputs: &InputRegistry,
    out:    &mut Vec<(Tag, f32)>,
) {
    out.clear();
    for (name, param) in params {
        let value = match param {
            Parameter::Literal(v) => *v,
            Parameter::Input(tag) => inputs.evaluate(tag, ctx, view, ParamValues::EMPTY),
        };
        out.push((name.clone(), value));
    }
}
