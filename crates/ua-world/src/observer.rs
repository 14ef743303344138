//! World observer trait for progress reporting and diagnostics.

use ua_brain::EvaluationSummary;
use ua_core::{AgentId, Tick};

use crate::DrainReport;

/// Callbacks invoked by [`World::tick`][crate::World::tick] and
/// [`World::run`][crate::World::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: transition printer
///
/// ```rust
/// use ua_brain::EvaluationSummary;
/// use ua_core::AgentId;
/// use ua_world::WorldObserver;
///
/// struct Transitions;
///
/// impl WorldObserver for Transitions {
///     fn on_evaluation(&mut self, agent: AgentId, summary: &EvaluationSummary) {
///         if let (true, Some(w)) = (summary.outcome.started_action(), &summary.winner) {
///             println!("{agent} -> {} ({:.2})", w.name, w.score);
///         }
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called at the very start of each tick, before any brain ticks.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every brain update, in drain order.
    fn on_evaluation(&mut self, _agent: AgentId, _summary: &EvaluationSummary) {}

    /// Called at the end of each tick with the drain outcome.
    fn on_tick_end(&mut self, _tick: Tick, _report: &DrainReport) {}

    /// Called once after a bounded [`run`][crate::World::run] completes.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
