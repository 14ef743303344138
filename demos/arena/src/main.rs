//! arena — smallest end-to-end example for the ua decision engine.
//!
//! A handful of agents random-walk in a square.  Each brain chooses between
//! attacking a nearby agent, wandering to a point on a ring around itself,
//! and idling.  Pass a JSON `EngineConfig` path as the first argument to
//! override the defaults; `RUST_LOG=debug` shows every evaluation.

mod actions;
mod providers;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use ua_agent::{AgentSpawn, AgentStoreBuilder};
use ua_brain::{Action, ActionSet, BrainSpec, EvaluationSummary, Services};
use ua_core::{AgentId, EngineConfig, Tick, TieBreak, Vec3};
use ua_world::{DrainReport, WorldBuilder, WorldObserver};

use actions::Timed;

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT: usize = 12;
const SEED:        u64   = 42;
const ARENA_SIZE:  f32   = 400.0;
const STEP:        f32   = 3.0; // max random-walk step per tick

/// The shared action set, in the same JSON form a host would load from disk.
const ACTION_SET_JSON: &str = r#"{
  "name": "arena",
  "actions": [
    {
      "name": "Attack", "action": "Attack", "priority": 0,
      "queries": [ { "tag": "Nearby", "params": { "Range": { "Literal": 120.0 } } } ],
      "considerations": [
        { "input": "Distance", "bookends": { "min": 0.0, "max": 120.0 },
          "curve": { "Builtin": { "shape": "Linear", "params": { "m": -1.0, "k": 0.0, "b": 1.0, "c": 0.0 } } } }
      ],
      "inertia": 0.25, "inertia_cooldown": 1.0
    },
    {
      "name": "Wander", "action": "Wander", "priority": 10, "blocking_tags": ["Sentry"],
      "queries": [
        { "tag": "Ring", "params": { "Radius": { "Literal": 60.0 } } },
        { "tag": "Headings" }
      ],
      "considerations": [
        { "input": "Distance", "bookends": { "min": 0.0, "max": 120.0 } }
      ]
    },
    { "name": "Idle", "action": "Idle", "priority": 20, "weight": 0.1 }
  ]
}"#;

/// Fixed spawns placed on top of the random-walk grid.
const SENTRIES_JSON: &str = r#"[
  { "location": { "x": 0.0,   "y": 0.0,   "z": 0.0 }, "tags": ["Sentry"] },
  { "location": { "x": 400.0, "y": 400.0, "z": 0.0 }, "tags": ["Sentry"] }
]"#;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ArenaObserver {
    starts:      BTreeMap<String, usize>,
    evaluations: usize,
    deferred:    usize,
    backlog:     usize,
}

impl WorldObserver for ArenaObserver {
    fn on_evaluation(&mut self, agent: AgentId, summary: &EvaluationSummary) {
        self.evaluations += 1;
        if summary.outcome == ua_brain::Outcome::Deferred {
            self.deferred += 1;
        }
        if let (true, Some(w)) = (summary.outcome.started_action(), &summary.winner) {
            tracing::info!(%agent, tick = %summary.tick, action = %w.name, score = w.score, "transition");
            *self.starts.entry(w.name.to_string()).or_default() += 1;
        }
    }

    fn on_tick_end(&mut self, _tick: Tick, report: &DrainReport) {
        self.backlog = self.backlog.max(report.remaining);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config: EngineConfig = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => EngineConfig {
            total_ticks:     300,
            seed:            SEED,
            budget_ms:       0.5,
            interval_jitter: 0.5,
            tie_break:       TieBreak::Seeded,
            ..EngineConfig::default()
        },
    };

    println!("=== arena — ua decision engine ===");
    println!(
        "Agents: {AGENT_COUNT} + sentries  |  Ticks: {}  |  Budget: {} ms  |  Seed: {}",
        config.total_ticks, config.budget_ms, config.seed
    );

    // 1. Services: providers and action kinds.
    let mut services = Services::new(config.clone());
    providers::register(&mut services)?;
    services.actions.register_fn("Attack", |a| Box::new(Timed::new(a, "Attack", 1.0, false)) as Box<dyn Action>)?;
    services.actions.register_fn("Wander", |a| Box::new(Timed::new(a, "Wander", 2.0, true)) as Box<dyn Action>)?;
    services.actions.register_fn("Idle", |a| Box::new(Timed::new(a, "Idle", 0.5, true)) as Box<dyn Action>)?;

    // 2. Agents on a grid, plus the sentries.
    let sentries: Vec<AgentSpawn> = serde_json::from_str(SENTRIES_JSON).context("parsing sentries")?;
    let side = (AGENT_COUNT as f32).sqrt().ceil() as usize;
    let spacing = ARENA_SIZE / side as f32;
    let builder = AgentStoreBuilder::new(config.seed)
        .agents(AGENT_COUNT, |i| {
            let (x, y) = ((i % side) as f32, (i / side) as f32);
            AgentSpawn::at(Vec3::new(x * spacing, y * spacing, 0.0))
        });
    let (store, rngs) = sentries.into_iter().fold(builder, |b, s| b.agent(s)).build();

    // 3. Brains share one action set.
    let set: ActionSet = serde_json::from_str(ACTION_SET_JSON).context("parsing action set")?;
    println!("Action set `{}`: {} definitions", set.name, set.actions.len());
    let spec = BrainSpec::new().with_set(Arc::new(set));

    let mut world = WorldBuilder::new(services, store, rngs).brain_for_all(spec).build()?;

    // 4. Run, random-walking agents between ticks.
    let mut observer = ArenaObserver::default();
    let started = Instant::now();
    while world.now() < config.end_tick() {
        world.tick(&mut observer);

        let ids: Vec<AgentId> = world.agents.agent_ids().collect();
        for id in ids {
            let rng = world.rngs.get_mut(id);
            let step = Vec3::new(rng.gen_range(-STEP..=STEP), rng.gen_range(-STEP..=STEP), 0.0);
            if let Some(p) = world.agents.location(id) {
                let next = p + step;
                let clamped = Vec3::new(next.x.clamp(0.0, ARENA_SIZE), next.y.clamp(0.0, ARENA_SIZE), 0.0);
                world.agents.set_location(id, clamped)?;
            }
        }
    }
    let elapsed = started.elapsed();

    // 5. Summary.
    println!();
    println!("Simulated {} ({} evaluations) in {:.1?}", world.clock, observer.evaluations, elapsed);
    println!("Deferred switches: {}  |  Peak queue backlog: {}", observer.deferred, observer.backlog);
    for (name, n) in &observer.starts {
        println!("  {name:<8} started {n:>4}x");
    }
    for brain in world.brains() {
        match brain.current_action() {
            Some(a) => println!(
                "  {}  running {} for {} ticks",
                brain.agent(),
                a.definition.name,
                world.now().since(a.started_at)
            ),
            None => println!("  {}  idle", brain.agent()),
        }
    }
    Ok(())
}
