//! Unit tests for ua-world.

use std::sync::{Arc, Mutex};

use ua_agent::{AgentSpawn, AgentStoreBuilder, WorldView};
use ua_brain::{
    Action, ActionDefinition, BrainSpec, CompletionSignal, EvaluationSummary, Outcome, Services,
};
use ua_core::{AgentId, Context, EngineConfig, Tag, Tick, Vec3};
use ua_scoring::Consideration;

use crate::{BudgetClock, DrainReport, UpdateQueue, World, WorldBuilder, WorldObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Budget clock that advances `step_ms` on every reading after the first,
/// so each brain update appears to cost exactly `step_ms`.
struct StepClock {
    now_ms:  f64,
    step_ms: f64,
}

impl StepClock {
    fn new(step_ms: f64) -> Self {
        Self { now_ms: -step_ms, step_ms }
    }
}

impl BudgetClock for StepClock {
    fn now_ms(&mut self) -> f64 {
        self.now_ms += self.step_ms;
        self.now_ms
    }
}

#[derive(Default)]
struct Recorder {
    evaluations: Vec<(Tick, AgentId, Outcome)>,
    reports:     Vec<DrainReport>,
    ticks:       Vec<Tick>,
    ended:       Option<Tick>,
}

impl WorldObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.ticks.push(tick);
    }

    fn on_evaluation(&mut self, agent: AgentId, summary: &EvaluationSummary) {
        self.evaluations.push((summary.tick, agent, summary.outcome));
    }

    fn on_tick_end(&mut self, _tick: Tick, report: &DrainReport) {
        self.reports.push(*report);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

/// Action that records cancels and optionally completes immediately.
struct Recorded {
    agent:   AgentId,
    log:     Arc<Mutex<Vec<String>>>,
    instant: bool,
}

impl Action for Recorded {
    fn perform(&mut self, _ctx: &Context, _view: &WorldView<'_>, done: CompletionSignal) {
        self.log.lock().unwrap().push(format!("perform {}", self.agent));
        if self.instant {
            done.complete();
        }
    }

    fn cancel(&mut self, _interrupting: Option<&Tag>) {
        self.log.lock().unwrap().push(format!("cancel {}", self.agent));
    }
}

fn services(config: EngineConfig, log: &Arc<Mutex<Vec<String>>>, instant: bool) -> Services {
    let mut services = Services::new(config);
    services.inputs.register_fn("One", |_, _, _| 1.0).unwrap();
    let log = log.clone();
    services
        .actions
        .register_fn("Act", move |agent| {
            Box::new(Recorded { agent, log: log.clone(), instant }) as Box<dyn Action>
        })
        .unwrap();
    services
}

fn spec() -> BrainSpec {
    BrainSpec::new().with_action(ActionDefinition::new("Act", "Act").consider(Consideration::new("One")))
}

fn world(n: usize, config: EngineConfig, instant: bool) -> (World<StepClock>, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (store, rngs) = AgentStoreBuilder::new(1)
        .agents(n, |i| AgentSpawn::at(Vec3::new(i as f32, 0.0, 0.0)))
        .build();
    let world = WorldBuilder::new(services(config, &log, instant), store, rngs)
        .brain_for_all(spec())
        .budget_clock(StepClock::new(1.0))
        .build()
        .unwrap();
    (world, log)
}

// ── UpdateQueue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    fn queued(n: u32) -> UpdateQueue {
        let mut q = UpdateQueue::new();
        for i in 0..n {
            q.queue(AgentId(i));
        }
        q
    }

    #[test]
    fn queueing_is_idempotent() {
        let mut q = UpdateQueue::new();
        assert!(q.queue(AgentId(3)));
        assert!(!q.queue(AgentId(3)));
        assert_eq!(q.len(), 1);
        assert!(q.contains(AgentId(3)));
        assert!(!q.contains(AgentId(100)));
    }

    #[test]
    fn fifo_order() {
        let mut q = UpdateQueue::new();
        for i in [5, 1, 3] {
            q.queue(AgentId(i));
        }
        assert_eq!(q.iter().collect::<Vec<_>>(), [AgentId(5), AgentId(1), AgentId(3)]);
        assert_eq!(q.pop(), Some(AgentId(5)));
        assert!(q.queue(AgentId(5)), "popped agents can queue again");
        assert_eq!(q.iter().collect::<Vec<_>>(), [AgentId(1), AgentId(3), AgentId(5)]);
    }

    #[test]
    fn remove_drops_membership() {
        let mut q = queued(3);
        assert!(q.remove(AgentId(1)));
        assert!(!q.remove(AgentId(1)));
        assert_eq!(q.iter().collect::<Vec<_>>(), [AgentId(0), AgentId(2)]);
    }

    #[test]
    fn drain_stops_at_budget() {
        let mut q = queued(10);
        let mut clock = StepClock::new(1.0);
        let mut seen = Vec::new();
        let report = q.drain(4.0, &mut clock, |a| seen.push(a));
        assert_eq!(report.processed, 4);
        assert_eq!(report.remaining, 6);
        assert_eq!(report.elapsed_ms, 4.0);
        assert_eq!(seen, (0..4).map(AgentId).collect::<Vec<_>>());
        assert_eq!(q.len(), 6);

        // Next drain picks up where this one stopped.
        let mut seen = Vec::new();
        q.drain(4.0, &mut clock, |a| seen.push(a));
        assert_eq!(seen, (4..8).map(AgentId).collect::<Vec<_>>());
    }

    #[test]
    fn drain_processes_at_least_one() {
        let mut q = queued(3);
        let report = q.drain(0.0, &mut StepClock::new(5.0), |_| {});
        assert_eq!(report.processed, 1);
        assert_eq!(report.remaining, 2);
    }

    #[test]
    fn drain_empties_queue_within_budget() {
        let mut q = queued(3);
        let report = q.drain(100.0, &mut StepClock::new(1.0), |_| {});
        assert_eq!(report, DrainReport { processed: 3, remaining: 0, elapsed_ms: 3.0 });
        assert!(q.is_empty());
        assert_eq!(q.drain(100.0, &mut StepClock::new(1.0), |_| {}).processed, 0);
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod world {
    use super::*;
    use crate::WorldError;

    fn config(budget_ms: f64) -> EngineConfig {
        EngineConfig { budget_ms, ..EngineConfig::default() }
    }

    #[test]
    fn budget_spreads_updates_across_ticks() {
        let (mut w, _) = world(10, config(4.0), false);
        let mut rec = Recorder::default();

        let r0 = w.tick(&mut rec);
        assert_eq!((r0.processed, r0.remaining), (4, 6));
        let r1 = w.tick(&mut rec);
        assert_eq!((r1.processed, r1.remaining), (4, 2));
        let r2 = w.tick(&mut rec);
        assert_eq!((r2.processed, r2.remaining), (2, 0));

        // FIFO: agents evaluated in queue order, each exactly once.
        let order: Vec<AgentId> = rec.evaluations.iter().map(|&(_, a, _)| a).collect();
        assert_eq!(order, (0..10).map(AgentId).collect::<Vec<_>>());
        assert!(rec.evaluations.iter().all(|&(_, _, o)| o == Outcome::Started));
    }

    #[test]
    fn brains_requeue_on_their_interval() {
        // 1/30 s ticks, 0.5 s interval: the second update lands 15 ticks later.
        let (mut w, _) = world(1, config(100.0), false);
        let mut rec = Recorder::default();
        w.run_ticks(20, &mut rec);
        let ticks: Vec<Tick> = rec.evaluations.iter().map(|&(t, _, _)| t).collect();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0], Tick(0));
        assert!(ticks[1] >= Tick(14) && ticks[1] <= Tick(16), "got {:?}", ticks[1]);
        assert_eq!(rec.evaluations[1].2, Outcome::Continued);
    }

    #[test]
    fn completion_triggers_next_tick_update() {
        let (mut w, log) = world(1, config(100.0), true);
        let mut rec = Recorder::default();
        w.run_ticks(3, &mut rec);
        let outcomes: Vec<Outcome> = rec.evaluations.iter().map(|&(_, _, o)| o).collect();
        assert_eq!(outcomes, [Outcome::Started; 3]);
        assert_eq!(log.lock().unwrap().len(), 3);
    }

    #[test]
    fn run_stops_at_total_ticks() {
        let (mut w, _) = world(2, EngineConfig { total_ticks: 5, ..config(100.0) }, false);
        let mut rec = Recorder::default();
        w.run(&mut rec);
        assert_eq!(rec.ticks, (0..5).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.ended, Some(Tick(5)));
        assert_eq!(w.now(), Tick(5));
    }

    #[test]
    fn despawn_cancels_and_dequeues() {
        let (mut w, log) = world(3, config(1.0), false);
        let mut rec = Recorder::default();
        w.tick(&mut rec); // agent 0 updated; 1 and 2 still queued
        assert!(w.queued().contains(AgentId(1)));

        w.despawn(AgentId(0)).unwrap();
        w.despawn(AgentId(1)).unwrap();
        assert!(w.brain(AgentId(0)).is_none());
        assert!(!w.queued().contains(AgentId(1)));
        assert_eq!(*log.lock().unwrap(), ["perform AgentId(0)", "cancel AgentId(0)"]);

        w.tick(&mut rec);
        let agents: Vec<AgentId> = rec.evaluations.iter().map(|&(_, a, _)| a).collect();
        assert_eq!(agents, [AgentId(0), AgentId(2)]);
        assert!(w.despawn(AgentId(0)).is_err(), "already gone");
    }

    #[test]
    fn spawn_with_brain_joins_next_tick() {
        let (mut w, _) = world(0, config(100.0), false);
        let handle = w.spawn(AgentSpawn::at(Vec3::ZERO), Some(&spec())).unwrap();
        let mut rec = Recorder::default();
        w.tick(&mut rec);
        assert_eq!(rec.evaluations, [(Tick(0), handle.id, Outcome::Started)]);
        assert!(w.brain(handle.id).unwrap().current_action().is_some());
    }

    #[test]
    fn brain_errors() {
        let (mut w, _) = world(2, config(100.0), false);
        assert!(matches!(w.add_brain(AgentId(0), &spec()), Err(WorldError::DuplicateBrain(_))));
        assert!(matches!(w.add_brain(AgentId(9), &spec()), Err(WorldError::Brain(_))));
        assert!(!w.queue_for_update(AgentId(9)));
        assert!(w.queue_for_update(AgentId(1)));
        assert!(!w.queue_for_update(AgentId(1)));
    }

    #[test]
    fn invalid_config_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (store, rngs) = AgentStoreBuilder::new(0).build();
        let bad = EngineConfig { tick_duration_secs: 0.0, ..EngineConfig::default() };
        let result = WorldBuilder::new(services(bad, &log, false), store, rngs).build();
        assert!(matches!(result, Err(WorldError::Core(_))));
    }

    #[test]
    fn invalidate_query_reaches_every_brain() {
        use ua_query::{Dimension, FnQuery, Query, QueryResult};

        let log = Arc::new(Mutex::new(Vec::new()));
        let mut services = services(config(100.0), &log, false);
        services
            .queries
            .register(
                "Here",
                FnQuery::new(Dimension::Location, |_, _, _| QueryResult::Locations(vec![Vec3::ZERO]))
                    .reuse_for(60.0),
            )
            .unwrap();
        let spec = BrainSpec::new().with_action(
            ActionDefinition::new("Act", "Act")
                .consider(Consideration::new("One"))
                .query(Query::new("Here")),
        );
        let (store, rngs) = AgentStoreBuilder::new(0).agents(3, |_| AgentSpawn::default()).build();
        let mut w = WorldBuilder::new(services, store, rngs)
            .brain_for_all(spec)
            .budget_clock(StepClock::new(0.0))
            .build()
            .unwrap();
        w.tick(&mut Recorder::default());
        assert_eq!(w.invalidate_query(&Tag::new("Here")), 3);
        assert_eq!(w.invalidate_query(&Tag::new("Here")), 0);
    }
}
