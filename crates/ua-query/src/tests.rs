//! Unit tests for ua-query.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ua_agent::{AgentSpawn, AgentStore, AgentStoreBuilder, WorldView};
use ua_core::{AgentId, Context, CustomValue, ParamValues, Rotator, Tick, Vec3};
use ua_pool::ResourcePool;
use ua_scoring::{CurveLibrary, InputRegistry, ScoringEnv};

use crate::{Dimension, FnQuery, Query, QueryCache, QueryRegistry, QueryResult, generate_contexts};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn agents(n: usize) -> AgentStore {
    let (store, _) = AgentStoreBuilder::new(0)
        .agents(n, |i| AgentSpawn::at(Vec3::new(i as f32 * 10.0, 0.0, 0.0)))
        .build();
    store
}

/// Returns `n` locations along x, where `n` is the `Count` parameter.
fn line_query(
    calls: Arc<AtomicUsize>,
) -> FnQuery<impl Fn(&Context, &WorldView<'_>, ParamValues<'_>) -> QueryResult + Send + Sync + 'static> {
    FnQuery::new(Dimension::Location, move |_ctx, _view, params| {
        calls.fetch_add(1, Ordering::SeqCst);
        let n = params.get_or("Count", 1.0) as usize;
        QueryResult::Locations((0..n).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect())
    })
}

fn fixed(
    dimension: Dimension,
    n:         usize,
) -> FnQuery<impl Fn(&Context, &WorldView<'_>, ParamValues<'_>) -> QueryResult + Send + Sync + 'static> {
    FnQuery::new(dimension, move |_ctx, view, _params| match dimension {
        Dimension::Target => QueryResult::Targets(
            view.agents.agent_ids().take(n).filter_map(|id| view.agents.handle(id)).collect(),
        ),
        Dimension::Location => QueryResult::Locations(vec![Vec3::new(1.0, 2.0, 3.0); n]),
        Dimension::Rotation => QueryResult::Rotations((0..n).map(|i| Rotator::from_yaw(i as f32)).collect()),
        Dimension::Custom => QueryResult::Customs((0..n).map(|i| CustomValue::Int(i as i64)).collect()),
    })
}

struct Fixture {
    store:  AgentStore,
    inputs: InputRegistry,
    curves: CurveLibrary,
    pool:   ResourcePool,
}

impl Fixture {
    fn new(n: usize) -> Self {
        Self {
            store:  agents(n),
            inputs: InputRegistry::new(0.0),
            curves: CurveLibrary::new(),
            pool:   ResourcePool::new(),
        }
    }

    fn env(&self, time_secs: f64) -> ScoringEnv<'_> {
        ScoringEnv {
            view:   WorldView::new(Tick(0), time_secs, &self.store),
            inputs: &self.inputs,
            curves: &self.curves,
            pool:   &self.pool,
        }
    }
}

// ── Cardinality ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod cardinality {
    use super::*;

    fn registry() -> QueryRegistry {
        let mut q = QueryRegistry::new();
        q.register("T3", fixed(Dimension::Target, 3)).unwrap();
        q.register("L2", fixed(Dimension::Location, 2)).unwrap();
        q.register("L0", fixed(Dimension::Location, 0)).unwrap();
        q.register("R4", fixed(Dimension::Rotation, 4)).unwrap();
        q.register("C5", fixed(Dimension::Custom, 5)).unwrap();
        q
    }

    fn count(tags: &[&str]) -> usize {
        let fx = Fixture::new(4);
        let reg = registry();
        let queries: Vec<Query> = tags.iter().map(|t| Query::new(*t)).collect();
        let mut cache = QueryCache::new();
        let mut out = Vec::new();
        generate_contexts(&queries, AgentId(0), &fx.env(0.0), &reg, &mut cache, &mut out)
    }

    #[test]
    fn product_of_non_empty_dimensions() {
        assert_eq!(count(&[]), 1);
        assert_eq!(count(&["T3"]), 3);
        assert_eq!(count(&["T3", "L2"]), 6);
        assert_eq!(count(&["T3", "L2", "R4"]), 24);
        assert_eq!(count(&["T3", "L2", "R4", "C5"]), 120);
        assert_eq!(count(&["L2", "C5"]), 10);
    }

    #[test]
    fn empty_dimension_is_absent() {
        assert_eq!(count(&["L0"]), 1);
        assert_eq!(count(&["T3", "L0"]), 3);
    }

    #[test]
    fn same_dimension_queries_union() {
        // Two location queries append: 2 + 2 = 4 locations.
        let fx = Fixture::new(4);
        let mut reg = registry();
        reg.register("L2b", fixed(Dimension::Location, 2)).unwrap();
        let queries = [Query::new("L2"), Query::new("L2b"), Query::new("T3")];
        let mut out = Vec::new();
        let n = generate_contexts(&queries, AgentId(0), &fx.env(0.0), &reg, &mut QueryCache::new(), &mut out);
        assert_eq!(n, 12);
        assert_eq!(out.len(), 12);
    }

    #[test]
    fn no_queries_yields_self_only_context() {
        let fx = Fixture::new(1);
        let mut out = vec![Context::for_self(AgentId(9))];
        generate_contexts(&[], AgentId(0), &fx.env(0.0), &QueryRegistry::new(), &mut QueryCache::new(), &mut out);
        assert_eq!(out, vec![Context::for_self(AgentId(0))]);
    }

    #[test]
    fn nesting_order_is_targets_outermost() {
        let fx = Fixture::new(2);
        let mut two_targets = QueryRegistry::new();
        two_targets.register("T2", fixed(Dimension::Target, 2)).unwrap();
        two_targets.register("C5", fixed(Dimension::Custom, 5)).unwrap();

        let queries = [Query::new("C5"), Query::new("T2")];
        let mut out = Vec::new();
        generate_contexts(&queries, AgentId(0), &fx.env(0.0), &two_targets, &mut QueryCache::new(), &mut out);
        assert_eq!(out.len(), 10);
        let t0 = fx.store.handle(AgentId(0));
        let t1 = fx.store.handle(AgentId(1));
        assert!(out[..5].iter().all(|c| c.target == t0));
        assert!(out[5..].iter().all(|c| c.target == t1));
        let customs: Vec<_> = out[..5].iter().map(|c| c.custom).collect();
        assert_eq!(customs, (0..5).map(|i| Some(CustomValue::Int(i))).collect::<Vec<_>>());
    }

    #[test]
    fn deterministic_across_runs() {
        let fx = Fixture::new(4);
        let reg = registry();
        let queries = [Query::new("T3"), Query::new("R4")];
        let (mut a, mut b) = (Vec::new(), Vec::new());
        generate_contexts(&queries, AgentId(1), &fx.env(0.0), &reg, &mut QueryCache::new(), &mut a);
        generate_contexts(&queries, AgentId(1), &fx.env(0.0), &reg, &mut QueryCache::new(), &mut b);
        assert_eq!(a, b);
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use ua_core::Tag;

    use super::*;

    #[test]
    fn unknown_query_contributes_nothing() {
        let fx = Fixture::new(3);
        let mut reg = QueryRegistry::new();
        reg.register("T3", fixed(Dimension::Target, 3)).unwrap();
        let queries = [Query::new("Missing"), Query::new("T3")];
        let mut out = Vec::new();
        for _ in 0..2 {
            let n = generate_contexts(&queries, AgentId(0), &fx.env(0.0), &reg, &mut QueryCache::new(), &mut out);
            assert_eq!(n, 3);
        }
        assert!(reg.get(&Tag::new("Missing")).is_none());
    }

    #[test]
    fn wrong_dimension_is_discarded() {
        let fx = Fixture::new(3);
        let mut reg = QueryRegistry::new();
        reg.register(
            "Liar",
            FnQuery::new(Dimension::Target, |_, _, _| QueryResult::Locations(vec![Vec3::ZERO; 4])),
        )
        .unwrap();
        let mut out = Vec::new();
        let n = generate_contexts(&[Query::new("Liar")], AgentId(0), &fx.env(0.0), &reg, &mut QueryCache::new(), &mut out);
        assert_eq!(n, 1);
        assert_eq!(out[0].location, Vec3::ZERO);
    }

    #[test]
    fn duplicate_registration_errors() {
        let mut reg = QueryRegistry::new();
        reg.register("T", fixed(Dimension::Target, 1)).unwrap();
        assert!(reg.register("T", fixed(Dimension::Target, 2)).is_err());
        assert_eq!(reg.len(), 1);
        assert!(reg.contains(&Tag::new("T")));
    }

    #[test]
    fn result_helpers() {
        let r = QueryResult::empty(Dimension::Rotation);
        assert!(r.is_empty());
        assert_eq!(r.dimension(), Dimension::Rotation);
        assert_eq!(Dimension::Custom.to_string(), "custom");
    }
}

// ── Caching ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod caching {
    use ua_core::Tag;

    use super::*;

    fn setup(reuse: f64) -> (Fixture, QueryRegistry, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut reg = QueryRegistry::new();
        reg.register("Line", line_query(calls.clone()).reuse_for(reuse).cache_on("Count"))
            .unwrap();
        (Fixture::new(1), reg, calls)
    }

    fn run(fx: &Fixture, reg: &QueryRegistry, cache: &mut QueryCache, now: f64, query: &Query) -> usize {
        let mut out = Vec::new();
        generate_contexts(std::slice::from_ref(query), AgentId(0), &fx.env(now), reg, cache, &mut out)
    }

    #[test]
    fn reused_within_duration() {
        let (fx, reg, calls) = setup(1.0);
        let mut cache = QueryCache::new();
        let q = Query::new("Line").param("Count", 3.0);
        assert_eq!(run(&fx, &reg, &mut cache, 0.0, &q), 3);
        assert_eq!(run(&fx, &reg, &mut cache, 0.5, &q), 3);
        assert_eq!(run(&fx, &reg, &mut cache, 0.99, &q), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.hits(), 2);
        assert_eq!(cache.runs(), 1);
    }

    #[test]
    fn rerun_after_expiry() {
        let (fx, reg, calls) = setup(1.0);
        let mut cache = QueryCache::new();
        let q = Query::new("Line").param("Count", 2.0);
        run(&fx, &reg, &mut cache, 0.0, &q);
        run(&fx, &reg, &mut cache, 1.0, &q);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn rerun_when_cache_param_changes() {
        let (fx, reg, calls) = setup(10.0);
        let mut cache = QueryCache::new();
        assert_eq!(run(&fx, &reg, &mut cache, 0.0, &Query::new("Line").param("Count", 2.0)), 2);
        assert_eq!(run(&fx, &reg, &mut cache, 0.1, &Query::new("Line").param("Count", 4.0)), 4);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // Both parameter sets are now cached.
        assert_eq!(run(&fx, &reg, &mut cache, 0.2, &Query::new("Line").param("Count", 2.0)), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn unlisted_param_does_not_force_rerun() {
        let (fx, reg, calls) = setup(10.0);
        let mut cache = QueryCache::new();
        run(&fx, &reg, &mut cache, 0.0, &Query::new("Line").param("Count", 2.0).param("Noise", 1.0));
        run(&fx, &reg, &mut cache, 0.1, &Query::new("Line").param("Count", 2.0).param("Noise", 7.0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_duration_never_caches() {
        let (fx, reg, calls) = setup(0.0);
        let mut cache = QueryCache::new();
        let q = Query::new("Line");
        for _ in 0..3 {
            run(&fx, &reg, &mut cache, 0.0, &q);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(cache.len() <= 1);
    }

    #[test]
    fn invalidate_forces_rerun() {
        let (fx, reg, calls) = setup(10.0);
        let mut cache = QueryCache::new();
        let q = Query::new("Line");
        run(&fx, &reg, &mut cache, 0.0, &q);
        assert!(cache.invalidate(&Tag::new("Line")));
        assert!(!cache.invalidate(&Tag::new("Line")));
        run(&fx, &reg, &mut cache, 0.1, &q);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn caches_are_per_agent() {
        let (fx, reg, calls) = setup(10.0);
        let (mut a, mut b) = (QueryCache::new(), QueryCache::new());
        let q = Query::new("Line");
        run(&fx, &reg, &mut a, 0.0, &q);
        run(&fx, &reg, &mut b, 0.0, &q);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn scratch_buffers_return_to_pool() {
        let (fx, reg, _) = setup(0.0);
        let mut cache = QueryCache::new();
        let q = Query::new("Line").param("Count", 3.0);
        run(&fx, &reg, &mut cache, 0.0, &q);
        let created = fx.pool.stats().created;
        for _ in 0..10 {
            run(&fx, &reg, &mut cache, 0.0, &q);
        }
        assert_eq!(fx.pool.stats().created, created, "steady state allocates no new buffers");
    }
}
