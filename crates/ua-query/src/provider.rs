//! Query provider contract and registry.

use std::fmt;
use std::sync::Arc;

use ua_agent::WorldView;
use ua_core::{AgentHandle, Context, CustomValue, MissLog, ParamValues, Rotator, Tag, TagMap, UaError, UaResult, Vec3};

/// The four independent context dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    Target,
    Location,
    Rotation,
    Custom,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Target   => "target",
            Dimension::Location => "location",
            Dimension::Rotation => "rotation",
            Dimension::Custom   => "custom",
        })
    }
}

/// Values produced by one query run. Always a single dimension.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryResult {
    Targets(Vec<AgentHandle>),
    Locations(Vec<Vec3>),
    Rotations(Vec<Rotator>),
    Customs(Vec<CustomValue>),
}

impl QueryResult {
    pub fn dimension(&self) -> Dimension {
        match self {
            QueryResult::Targets(_)   => Dimension::Target,
            QueryResult::Locations(_) => Dimension::Location,
            QueryResult::Rotations(_) => Dimension::Rotation,
            QueryResult::Customs(_)   => Dimension::Custom,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            QueryResult::Targets(v)   => v.len(),
            QueryResult::Locations(v) => v.len(),
            QueryResult::Rotations(v) => v.len(),
            QueryResult::Customs(v)   => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An empty result for `dim`.
    pub fn empty(dim: Dimension) -> Self {
        match dim {
            Dimension::Target   => QueryResult::Targets(Vec::new()),
            Dimension::Location => QueryResult::Locations(Vec::new()),
            Dimension::Rotation => QueryResult::Rotations(Vec::new()),
            Dimension::Custom   => QueryResult::Customs(Vec::new()),
        }
    }
}

/// Produces candidate values for one dimension.
///
/// `execute` receives a self-only context (the acting agent, zero
/// location/rotation) and the query's resolved parameters.
pub trait QueryProvider: Send + Sync + 'static {
    /// The dimension every result of this provider fills.
    fn dimension(&self) -> Dimension;

    fn execute(&self, ctx: &Context, view: &WorldView<'_>, params: ParamValues<'_>) -> QueryResult;

    /// Parameter names whose values decide whether a cached result can be
    /// reused.  Parameters not listed never force a rerun.
    fn cache_params(&self) -> &[Tag] {
        &[]
    }

    /// Seconds a result may be reused for unchanged cache parameters.
    /// `0` disables caching.
    fn reuse_duration_secs(&self) -> f64 {
        0.0
    }
}

/// Tag → provider table.
#[derive(Default)]
pub struct QueryRegistry {
    providers: TagMap<Arc<dyn QueryProvider>>,
    misses:    MissLog,
}

impl QueryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tag: impl Into<Tag>, provider: impl QueryProvider) -> UaResult<()> {
        self.register_shared(tag, Arc::new(provider))
    }

    pub fn register_shared(
        &mut self,
        tag:      impl Into<Tag>,
        provider: Arc<dyn QueryProvider>,
    ) -> UaResult<()> {
        let tag = tag.into();
        if self.providers.contains_key(&tag) {
            return Err(UaError::DuplicateProvider { kind: "query", tag });
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

    /// Provider for `tag`.  Unknown tags warn once and return `None`, which
    /// callers treat as an empty result set.
    pub fn get(&self, tag: &Tag) -> Option<&Arc<dyn QueryProvider>> {
        let provider = self.providers.get(tag);
        if provider.is_none() && self.misses.first_miss(tag) {
            tracing::warn!(%tag, "no query provider registered; treating as empty");
        }
        provider
    }

    /// Once-per-tag reporting for providers that return the wrong dimension.
    pub(crate) fn report_mismatch(&self, tag: &Tag, declared: Dimension, got: Dimension) {
        if self.misses.first_miss(tag) {
            tracing::warn!(%tag, %declared, %got, "query returned values for an undeclared dimension; ignored");
        }
    }
}

/// Closure-backed provider with optional caching settings.
///
/// ```rust
/// use ua_query::{Dimension, FnQuery, QueryRegistry, QueryResult};
///
/// let mut queries = QueryRegistry::new();
/// let everyone = FnQuery::new(Dimension::Target, |_ctx, view, _params| {
///     QueryResult::Targets(view.agents.agent_ids().filter_map(|id| view.agents.handle(id)).collect())
/// })
/// .reuse_for(0.5);
/// queries.register("Everyone", everyone).unwrap();
/// assert_eq!(queries.len(), 1);
/// ```
pub struct FnQuery<F> {
    dimension:    Dimension,
    reuse_secs:   f64,
    cache_params: Vec<Tag>,
    f:            F,
}

impl<F> FnQuery<F> {
    pub fn new(dimension: Dimension, f: F) -> Self
    where
        F: Fn(&Context, &WorldView<'_>, ParamValues<'_>) -> QueryResult + Send + Sync + 'static,
    {
        Self { dimension, reuse_secs: 0.0, cache_params: Vec::new(), f }
    }

    /// Reuse results for `secs` simulated seconds.
    pub fn reuse_for(mut self, secs: f64) -> Self {
        self.reuse_secs = secs;
        self
    }

    /// Rerun when parameter `name` changes value.
    pub fn cache_on(mut self, name: impl Into<Tag>) -> Self {
        self.cache_params.push(name.into());
        self
    }
}

impl<F> QueryProvider for FnQuery<F>
where
    F: Fn(&Context, &WorldView<'_>, ParamValues<'_>) -> QueryResult + Send + Sync + 'static,
{
    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn execute(&self, ctx: &Context, view: &WorldView<'_>, params: ParamValues<'_>) -> QueryResult {
        (self.f)(ctx, view, params)
    }

    fn cache_params(&self) -> &[Tag] {
        &self.cache_params
    }

    fn reuse_duration_secs(&self) -> f64 {
        self.reuse_secs
    }
}
