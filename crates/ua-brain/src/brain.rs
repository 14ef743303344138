//! The per-agent decision engine.

use std::sync::Arc;

use tracing::{debug, info};
use ua_agent::WorldView;
use ua_core::{AgentId, AgentRng, Context, Tag, Tick, TieBreak};
use ua_query::{QueryCache, generate_contexts};
use ua_scoring::{SCORE_EPSILON, ScoringEnv, score_context};

use crate::action::{CompletionWatch, completion_pair};
use crate::{Action, ActionDefinition, BrainResult, BrainSpec, EvaluationSummary, Outcome, Services, Winner};

/// One scored `(definition, context)` pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Index into the brain's combined definitions.
    pub action:  usize,
    pub context: Context,
    pub score:   f32,
}

/// The action a brain is currently running.
pub struct ActiveAction {
    pub definition: Arc<ActionDefinition>,
    pub context:    Context,
    /// Winning score when it started, inertia included.
    pub score:      f32,
    pub started_at: Tick,
    index:          usize,
    action:         Box<dyn Action>,
    done:           CompletionWatch,
}

impl ActiveAction {
    pub fn can_be_interrupted(&self) -> bool {
        self.action.can_be_interrupted()
    }

    /// Same definition bound to the same context.  The running definition
    /// on any other context is a different choice.
    fn is_running(&self, candidate: &Candidate) -> bool {
        self.index == candidate.action && self.context == candidate.context
    }
}

/// Decision state for one agent.
///
/// The owner drives a brain with two calls:
///
/// - [`tick`][Self::tick] every frame: decays the inertia cooldown, advances
///   the running action, polls for its completion, and reports whether the
///   brain wants to be queued for an update.
/// - [`update`][Self::update] when the scheduler gets to it: walks the
///   priority groups, scores every eligible `(action, context)` pair, and
///   starts, keeps, or defers the winner.
pub struct Brain {
    agent:            AgentId,
    actions:          Vec<Arc<ActionDefinition>>,
    current:          Option<ActiveAction>,
    inertia:          f32,
    inertia_cooldown: f32,
    interval_secs:    f32,
    since_update:     f32,
    next_update_in:   f32,
    update_requested: bool,
    cache:            QueryCache,
    last_evaluation:  Option<EvaluationSummary>,
}

impl Brain {
    /// Build a brain for `agent` from `spec`.
    ///
    /// The first update is due after a random fraction (`interval_jitter`)
    /// of the update interval, drawn from `rng`.
    pub fn new(
        agent:    AgentId,
        spec:     &BrainSpec,
        services: &Services,
        rng:      &mut AgentRng,
    ) -> BrainResult<Self> {
        let actions = spec.combined();
        for def in &actions {
            def.validate()?;
        }

        let interval = services.config.update_interval_secs;
        let jitter = services.config.interval_jitter.clamp(0.0, 1.0);
        let first = if jitter > 0.0 { interval * jitter * rng.random::<f32>() } else { 0.0 };

        Ok(Self {
            agent,
            actions,
            current:          None,
            inertia:          0.0,
            inertia_cooldown: 0.0,
            interval_secs:    interval,
            since_update:     0.0,
            next_update_in:   first,
            update_requested: false,
            cache:            QueryCache::new(),
            last_evaluation:  None,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// Combined definitions, sorted by ascending priority.
    pub fn actions(&self) -> &[Arc<ActionDefinition>] {
        &self.actions
    }

    pub fn current_action(&self) -> Option<&ActiveAction> {
        self.current.as_ref()
    }

    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    pub fn inertia_cooldown(&self) -> f32 {
        self.inertia_cooldown
    }

    pub fn time_since_last_update(&self) -> f32 {
        self.since_update
    }

    pub fn last_evaluation(&self) -> Option<&EvaluationSummary> {
        self.last_evaluation.as_ref()
    }

    pub fn query_cache(&self) -> &QueryCache {
        &self.cache
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Ask to be queued on the next tick regardless of the interval.
    pub fn request_update(&mut self) {
        self.update_requested = true;
    }

    /// Drop cached results for query `tag`.
    pub fn invalidate_query(&mut self, tag: &Tag) -> bool {
        self.cache.invalidate(tag)
    }

    /// Drop every cached query result.
    pub fn invalidate_queries(&mut self) {
        self.cache.clear();
    }

    /// Cancel the running action without naming a successor and request a
    /// fresh update.  Returns whether anything was running.
    pub fn interrupt(&mut self) -> bool {
        let cancelled = self.cancel_current(None);
        self.update_requested |= cancelled;
        cancelled
    }

    /// Advance per-frame state by `dt` seconds.  Returns `true` when the
    /// brain wants to be queued for an update.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.inertia_cooldown > 0.0 {
            self.inertia_cooldown = (self.inertia_cooldown - dt).max(0.0);
        }
        self.since_update += dt;

        if let Some(active) = self.current.as_mut() {
            active.action.tick(dt);
            if active.done.poll() {
                self.finish_current();
            }
        }

        self.update_requested || self.since_update >= self.next_update_in
    }

    /// Run one full evaluation and act on the result.
    pub fn update(
        &mut self,
        services: &Services,
        view:     WorldView<'_>,
        rng:      &mut AgentRng,
    ) -> &EvaluationSummary {
        self.since_update = 0.0;
        self.next_update_in = self.interval_secs;
        self.update_requested = false;

        let mut summary = EvaluationSummary::new(view.tick);
        if !view.agents.is_alive(self.agent) {
            summary.outcome = Outcome::AgentGone;
            return self.record(summary);
        }

        let env = ScoringEnv {
            view,
            inputs: &services.inputs,
            curves: &services.curves,
            pool:   &services.pool,
        };
        let mut candidates = services.pool.reserve::<Candidate>();
        let mut contexts = services.pool.reserve::<Context>();

        // ── Priority-group walk ───────────────────────────────────────────
        let mut start = 0;
        while start < self.actions.len() {
            let priority = self.actions[start].priority;
            let len = self.actions[start..].iter().take_while(|d| d.priority == priority).count();
            let end = start + len;
            summary.groups_walked += 1;

            for (idx, def) in self.actions.iter().enumerate().take(end).skip(start) {
                if !is_eligible(def, self.agent, services, &view) {
                    continue;
                }
                summary.actions_evaluated += 1;
                generate_contexts(
                    &def.queries,
                    self.agent,
                    &env,
                    &services.queries,
                    &mut self.cache,
                    &mut contexts,
                );
                for ctx in contexts.iter() {
                    // An expired target aborts this context only.
                    if ctx.target.is_some_and(|t| view.agents.resolve(t).is_none()) {
                        continue;
                    }
                    summary.contexts_scored += 1;
                    let score = score_context(def.weight, &def.considerations, ctx, &env);
                    if score > 0.0 {
                        candidates.push(Candidate { action: idx, context: *ctx, score });
                    }
                }
            }

            if !candidates.is_empty() {
                break;
            }
            start = end;
        }

        // ── Inertia ───────────────────────────────────────────────────────
        if let Some(active) = &self.current {
            if self.inertia_cooldown > 0.0 {
                for c in candidates.iter_mut().filter(|c| active.is_running(c)) {
                    c.score += self.inertia;
                }
            }
        }
        summary.candidates = candidates.len();

        let Some(winner) = pick_winner(&candidates, services.config.tie_break, rng) else {
            return self.record(summary);
        };

        // ── Transition ────────────────────────────────────────────────────
        let def = Arc::clone(&self.actions[winner.action]);
        summary.winner = Some(Winner {
            name:    def.name.clone(),
            score:   winner.score,
            context: winner.context,
        });
        summary.outcome = match &self.current {
            None => Outcome::Started,
            Some(active) if active.is_running(&winner) => Outcome::Continued,
            Some(active) if !active.action.can_be_interrupted() => Outcome::Deferred,
            Some(_) => Outcome::Interrupted,
        };

        match summary.outcome {
            Outcome::Interrupted => {
                self.cancel_current(Some(&def.name));
                self.start(def, winner, services, &view);
            }
            Outcome::Started => self.start(def, winner, services, &view),
            Outcome::Deferred => {
                debug!(agent = %self.agent, winner = %def.name, "running action is not interruptible; deferring");
            }
            _ => {}
        }
        self.record(summary)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn start(
        &mut self,
        def:      Arc<ActionDefinition>,
        winner:   Candidate,
        services: &Services,
        view:     &WorldView<'_>,
    ) {
        debug_assert!(self.current.is_none(), "starting an action while another is current");
        // Eligibility already resolved the kind; a miss here means the
        // library changed between the two lookups.
        let Some(factory) = services.actions.get(&def.action) else {
            return;
        };

        let mut action = factory.create(self.agent);
        let (signal, done) = completion_pair();
        action.perform(&winner.context, view, signal);
        info!(agent = %self.agent, action = %def.name, score = winner.score, "action started");

        self.inertia = def.inertia;
        self.inertia_cooldown = def.inertia_cooldown;
        self.current = Some(ActiveAction {
            definition: def,
            context:    winner.context,
            score:      winner.score,
            started_at: view.tick,
            index:      winner.action,
            action,
            done,
        });
    }

    fn finish_current(&mut self) {
        if let Some(active) = self.current.take() {
            info!(agent = %self.agent, action = %active.definition.name, "action completed");
        }
        self.inertia = 0.0;
        self.inertia_cooldown = 0.0;
        self.update_requested = true;
    }

    /// Cancel and drop the running action.  Used for interruption and for
    /// tearing a brain down.
    pub fn cancel_current(&mut self, interrupting: Option<&Tag>) -> bool {
        let Some(mut active) = self.current.take() else {
            return false;
        };
        active.action.cancel(interrupting);
        info!(agent = %self.agent, action = %active.definition.name, "action cancelled");
        self.inertia = 0.0;
        self.inertia_cooldown = 0.0;
        true
    }

    fn record(&mut self, summary: EvaluationSummary) -> &EvaluationSummary {
        debug!(
            agent = %self.agent,
            tick = %summary.tick,
            groups = summary.groups_walked,
            actions = summary.actions_evaluated,
            contexts = summary.contexts_scored,
            candidates = summary.candidates,
            outcome = ?summary.outcome,
            "brain evaluated"
        );
        self.last_evaluation.insert(summary)
    }
}

/// Cheap gates, checked before any query runs.
fn is_eligible(def: &ActionDefinition, agent: AgentId, services: &Services, view: &WorldView<'_>) -> bool {
    if def.weight <= SCORE_EPSILON {
        return false;
    }
    let disabled = &services.config.disabled_actions;
    if disabled.contains(&def.name) || disabled.contains(&def.action) {
        return false;
    }
    if !view.agents.has_all_tags(agent, &def.required_tags) {
        return false;
    }
    if view.agents.has_any_tags(agent, &def.blocking_tags) {
        return false;
    }
    services.actions.get(&def.action).is_some()
}

/// Highest score wins; ties resolved per `tie_break`.
pub fn pick_winner(candidates: &[Candidate], tie_break: TieBreak, rng: &mut AgentRng) -> Option<Candidate> {
    let best = candidates.iter().map(|c| c.score).reduce(f32::max)?;
    let mut tied = candidates.iter().filter(|c| c.score == best);
    match tie_break {
        TieBreak::First => tied.next().copied(),
        TieBreak::Seeded => {
            let n = candidates.iter().filter(|c| c.score == best).count();
            let k = rng.pick_index(n)?;
            tied.nth(k).copied()
        }
    }
}
