//! Per-agent query result cache.
//!
//! A result is reused while it is younger than the provider's reuse
//! duration *and* the provider's cache parameters resolve to the same
//! values as when it ran.  Other parameters are ignored for reuse.

use ua_agent::WorldView;
use ua_core::{Context, ParamValues, Tag, TagMap};

use crate::{QueryProvider, QueryResult};

struct CacheEntry {
    /// Bit patterns of the provider's cache parameters, in declared order.
    key:         Vec<Option<u32>>,
    result:      QueryResult,
    executed_at: f64,
}

/// Cached query results owned by one brain.
#[derive(Default)]
pub struct QueryCache {
    entries: TagMap<Vec<CacheEntry>>,
    runs:    u64,
    hits:    u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the result for `tag`, running `provider` unless a live entry
    /// with matching cache parameters exists.
    pub fn fetch(
        &mut self,
        tag:      &Tag,
        provider: &dyn QueryProvider,
        ctx:      &Context,
        view:     &WorldView<'_>,
        params:   ParamValues<'_>,
    ) -> &QueryResult {
        let now = view.time_secs;
        let reuse = provider.reuse_duration_secs();
        let key: Vec<Option<u32>> = provider
            .cache_params()
            .iter()
            .map(|name| params.get(name.as_str()).map(f32::to_bits))
            .collect();

        let entries = self.entries.entry(tag.clone()).or_default();
        // Expired entries go first; with a zero reuse duration that is all of them.
        entries.retain(|e| now - e.executed_at < reuse);

        if let Some(i) = entries.iter().position(|e| e.key == key) {
            self.hits += 1;
            return &entries[i].result;
        }

        self.runs += 1;
        let result = provider.execute(ctx, view, params);
        let idx = entries.len();
        entries.push(CacheEntry { key, result, executed_at: now });
        &entries[idx].result
    }

    /// Drop every entry for `tag`.  Returns whether anything was cached.
    pub fn invalidate(&mut self, tag: &Tag) -> bool {
        self.entries.remove(tag).is_some_and(|v| !v.is_empty())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored results across all tags (live or not yet pruned).
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Provider executions performed through this cache.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Lookups served without running the provider.
    pub fn hits(&self) -> u64 {
        self.hits
    }
}
