//! Context generation: queries → dimension lists → Cartesian product.

use ua_core::{AgentHandle, AgentId, Context, CustomValue, ParamValues, Params, Parameter, Rotator, Tag, Vec3};
use ua_scoring::{ScoringEnv, resolve_params};

use crate::{QueryCache, QueryRegistry, QueryResult};

/// One query attached to an action definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    pub tag: Tag,

    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Params,
}

impl Query {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self { tag: tag.into(), params: Params::new() }
    }

    pub fn param(mut self, name: impl Into<Tag>, value: f32) -> Self {
        self.params.insert(name.into(), Parameter::Literal(value));
        self
    }

    pub fn param_input(mut self, name: impl Into<Tag>, input: impl Into<Tag>) -> Self {
        self.params.insert(name.into(), Parameter::Input(input.into()));
        self
    }
}

/// Build every context for `queries` into `out` (cleared first) and return
/// how many were produced.
///
/// Query parameters are resolved against a self-only context.  Unknown
/// query tags and results for the wrong dimension contribute nothing.  A
/// dimension with no values does not take part in the product, so the
/// count is the product of the non-empty dimension sizes, and exactly one
/// self-only context when every dimension is empty.
pub fn generate_contexts(
    queries:    &[Query],
    self_agent: AgentId,
    env:        &ScoringEnv<'_>,
    registry:   &QueryRegistry,
    cache:      &mut QueryCache,
    out:        &mut Vec<Context>,
) -> usize {
    out.clear();
    let base = Context::for_self(self_agent);

    let mut targets   = env.pool.reserve::<AgentHandle>();
    let mut locations = env.pool.reserve::<Vec3>();
    let mut rotations = env.pool.reserve::<Rotator>();
    let mut customs   = env.pool.reserve::<CustomValue>();
    let mut resolved  = env.pool.reserve::<(Tag, f32)>();

    for query in queries {
        let Some(provider) = registry.get(&query.tag) else {
            continue;
        };
        resolve_params(&query.params, &base, &env.view, env.inputs, &mut resolved);
        let result = cache.fetch(
            &query.tag,
            provider.as_ref(),
            &base,
            &env.view,
            ParamValues::new(&resolved),
        );

        let declared = provider.dimension();
        if result.dimension() != declared {
            registry.report_mismatch(&query.tag, declared, result.dimension());
            continue;
        }
        match result {
            QueryResult::Targets(v)   => targets.extend_from_slice(v),
            QueryResult::Locations(v) => locations.extend_from_slice(v),
            QueryResult::Rotations(v) => rotations.extend_from_slice(v),
            QueryResult::Customs(v)   => customs.extend_from_slice(v),
        }
    }

    for target in or_absent(targets.as_slice()) {
        for location in or_absent(locations.as_slice()) {
            for rotation in or_absent(rotations.as_slice()) {
                for custom in or_absent(customs.as_slice()) {
                    out.push(Context {
                        self_agent,
                        target,
                        location: location.unwrap_or(Vec3::ZERO),
                        rotation: rotation.unwrap_or(Rotator::ZERO),
                        custom,
                    });
                }
            }
        }
    }
    out.len()
}

/// Each value wrapped in `Some`, or a single `None` for an empty dimension.
fn or_absent<T: Copy>(values: &[T]) -> impl Iterator<Item = Option<T>> + '_ {
    let absent = values.is_empty().then_some(None);
    values.iter().copied().map(Some).chain(absent)
}
