//! Read-only world state passed to every provider callback.

use ua_core::Tick;

use crate::AgentStore;

/// A read-only snapshot of the world passed to input providers, query
/// providers, and actions.
///
/// Built once per tick by the world and shared (immutably) across every
/// brain update drained that tick.
#[derive(Copy, Clone)]
pub struct WorldView<'a> {
    /// Current frame.
    pub tick: Tick,

    /// Simulated seconds since tick 0.  Query caches compare against this.
    pub time_secs: f64,

    /// Read-only view of every agent's SoA state arrays.
    pub agents: &'a AgentStore,
}

impl<'a> WorldView<'a> {
    #[inline]
    pub fn new(tick: Tick, time_secs: f64, agents: &'a AgentStore) -> Self {
        Self { tick, time_secs, agents }
    }
}
