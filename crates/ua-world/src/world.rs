//! The `World` struct and its tick loop.

use ua_agent::{AgentRngs, AgentSpawn, AgentStore, WorldView};
use ua_brain::{Brain, BrainError, BrainSpec, Services};
use ua_core::{AgentHandle, AgentId, EngineConfig, SimClock, Tag, Tick};

use crate::{BudgetClock, DrainReport, UpdateQueue, WallClock, WorldError, WorldObserver, WorldResult};

/// Owns every agent, brain and engine service, and drives the two-phase
/// tick loop:
///
/// 1. **Brain tick** (ascending `AgentId`): decay inertia cooldowns, advance
///    running actions, poll completions; brains that are due join the
///    [`UpdateQueue`] (idempotently).
/// 2. **Drain**: pop queued brains in FIFO order and run their updates until
///    `budget_ms` of [`BudgetClock`] time has been spent.  The rest wait
///    for the next tick.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World<C: BudgetClock = WallClock> {
    /// Simulation clock: current tick and simulated seconds.
    pub clock: SimClock,

    /// Agent state.  The host may mutate it between ticks.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs.
    pub rngs: AgentRngs,

    /// Provider tables, scratch pool and engine config.
    pub services: Services,

    /// Brains indexed by `AgentId`; `None` for agents without one.
    pub(crate) brains: Vec<Option<Brain>>,

    pub(crate) queue: UpdateQueue,

    pub(crate) budget_clock: C,
}

impl<C: BudgetClock> World<C> {
    // ── Public API ────────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.services.config
    }

    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: WorldObserver>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config().end_tick() {
            self.tick(observer);
        }
        observer.on_run_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: WorldObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    /// Advance one tick.
    pub fn tick<O: WorldObserver>(&mut self, observer: &mut O) -> DrainReport {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let Self { clock, agents, rngs, services, brains, queue, budget_clock } = self;

        // ── Phase 1: per-frame brain tick ─────────────────────────────────
        let dt = clock.tick_duration_secs;
        for brain in brains.iter_mut().flatten() {
            if brain.tick(dt) {
                queue.queue(brain.agent());
            }
        }

        // ── Phase 2: budgeted drain ───────────────────────────────────────
        let view = WorldView::new(now, clock.elapsed_secs(), agents);
        let report = queue.drain(services.config.budget_ms, budget_clock, |agent| {
            let Some(brain) = brains.get_mut(agent.index()).and_then(Option::as_mut) else {
                return;
            };
            let summary = brain.update(services, view, rngs.get_mut(agent));
            observer.on_evaluation(agent, summary);
        });

        observer.on_tick_end(now, &report);
        clock.advance();
        report
    }

    // ── Agents and brains ─────────────────────────────────────────────────

    /// Spawn an agent, optionally with a brain.
    pub fn spawn(&mut self, spawn: AgentSpawn, spec: Option<&BrainSpec>) -> WorldResult<AgentHandle> {
        let handle = self.agents.spawn(spawn);
        self.rngs.ensure(handle.id);
        if let Some(spec) = spec {
            self.add_brain(handle.id, spec)?;
        }
        Ok(handle)
    }

    /// Attach a brain to a live agent that has none.
    pub fn add_brain(&mut self, agent: AgentId, spec: &BrainSpec) -> WorldResult<()> {
        if !self.agents.is_alive(agent) {
            return Err(BrainError::DeadAgent(agent).into());
        }
        let idx = agent.index();
        if idx >= self.brains.len() {
            self.brains.resize_with(idx + 1, || None);
        }
        if self.brains[idx].is_some() {
            return Err(WorldError::DuplicateBrain(agent));
        }
        let brain = Brain::new(agent, spec, &self.services, self.rngs.get_mut(agent))?;
        self.brains[idx] = Some(brain);
        Ok(())
    }

    /// Cancel the agent's running action, drop its brain, dequeue it, and
    /// free its slot.
    pub fn despawn(&mut self, agent: AgentId) -> WorldResult<()> {
        if let Some(mut brain) = self.brains.get_mut(agent.index()).and_then(Option::take) {
            brain.cancel_current(None);
        }
        self.queue.remove(agent);
        self.agents.despawn(agent)?;
        tracing::debug!(%agent, "agent despawned");
        Ok(())
    }

    pub fn brain(&self, agent: AgentId) -> Option<&Brain> {
        self.brains.get(agent.index()).and_then(Option::as_ref)
    }

    pub fn brain_mut(&mut self, agent: AgentId) -> Option<&mut Brain> {
        self.brains.get_mut(agent.index()).and_then(Option::as_mut)
    }

    /// All brains, ascending `AgentId`.
    pub fn brains(&self) -> impl Iterator<Item = &Brain> {
        self.brains.iter().flatten()
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Queue `agent` for an update.  Idempotent; agents without a brain are
    /// ignored.
    pub fn queue_for_update(&mut self, agent: AgentId) -> bool {
        self.brain(agent).is_some() && self.queue.queue(agent)
    }

    pub fn queued(&self) -> &UpdateQueue {
        &self.queue
    }

    /// Drop cached results for query `tag` on every brain.  Returns how many
    /// brains had something cached.
    pub fn invalidate_query(&mut self, tag: &Tag) -> usize {
        self.brains
            .iter_mut()
            .flatten()
            .map(|brain| brain.invalidate_query(tag))
            .filter(|&had| had)
            .count()
    }
}
