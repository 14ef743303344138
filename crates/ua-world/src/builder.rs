//! Fluent builder for constructing a [`World`].

use ua_agent::{AgentRngs, AgentStore};
use ua_brain::{BrainSpec, Services};
use ua_core::AgentId;

use crate::{BudgetClock, UpdateQueue, WallClock, World, WorldResult};

/// Fluent builder for [`World<C>`].
///
/// # Required inputs
///
/// - [`Services`] — engine config plus registered inputs, queries, curves
///   and actions
/// - [`AgentStore`] + [`AgentRngs`] — from [`ua_agent::AgentStoreBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                      |
/// |-----------------------|------------------------------|
/// | `.brain(id, spec)`    | No brains                    |
/// | `.brain_for_all(spec)`| No brains                    |
/// | `.budget_clock(c)`    | `WallClock`                  |
///
/// # Example
///
/// ```rust
/// use ua_agent::{AgentSpawn, AgentStoreBuilder};
/// use ua_brain::{BrainSpec, Services};
/// use ua_core::EngineConfig;
/// use ua_world::{NoopObserver, WorldBuilder};
///
/// let (store, rngs) = AgentStoreBuilder::new(42).agents(3, |_| AgentSpawn::default()).build();
/// let mut world = WorldBuilder::new(Services::new(EngineConfig::default()), store, rngs)
///     .brain_for_all(BrainSpec::new())
///     .build()
///     .unwrap();
/// world.run_ticks(2, &mut NoopObserver);
/// assert_eq!(world.brains().count(), 3);
/// ```
pub struct WorldBuilder<C: BudgetClock = WallClock> {
    services:     Services,
    agents:       AgentStore,
    rngs:         AgentRngs,
    brains:       Vec<(AgentId, BrainSpec)>,
    budget_clock: C,
}

impl WorldBuilder<WallClock> {
    pub fn new(services: Services, agents: AgentStore, rngs: AgentRngs) -> Self {
        Self {
            services,
            agents,
            rngs,
            brains:       Vec::new(),
            budget_clock: WallClock::new(),
        }
    }
}

impl<C: BudgetClock> WorldBuilder<C> {
    /// Give `agent` a brain built from `spec`.
    pub fn brain(mut self, agent: AgentId, spec: BrainSpec) -> Self {
        self.brains.push((agent, spec));
        self
    }

    /// Give every live agent a brain built from `spec`.
    pub fn brain_for_all(mut self, spec: BrainSpec) -> Self {
        let ids: Vec<AgentId> = self.agents.agent_ids().collect();
        self.brains.extend(ids.into_iter().map(|id| (id, spec.clone())));
        self
    }

    /// Replace the time source used for budget checks.
    pub fn budget_clock<C2: BudgetClock>(self, budget_clock: C2) -> WorldBuilder<C2> {
        WorldBuilder {
            services: self.services,
            agents:   self.agents,
            rngs:     self.rngs,
            brains:   self.brains,
            budget_clock,
        }
    }

    /// Validate the config, build every brain, and return a ready-to-run
    /// [`World`].
    pub fn build(self) -> WorldResult<World<C>> {
        self.services.config.validate()?;

        let mut world = World {
            clock:        self.services.config.make_clock(),
            agents:       self.agents,
            rngs:         self.rngs,
            services:     self.services,
            brains:       Vec::new(),
            queue:        UpdateQueue::new(),
            budget_clock: self.budget_clock,
        };
        for (agent, spec) in &self.brains {
            world.add_brain(*agent, spec)?;
        }
        tracing::info!(
            agents = world.agents.len(),
            brains = world.brains().count(),
            budget_ms = world.services.config.budget_ms,
            "world built"
        );
        Ok(world)
    }
}
