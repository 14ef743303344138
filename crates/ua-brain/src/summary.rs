//! Per-update diagnostics.

use ua_core::{Context, Tag, Tick};

/// What one brain update did.  Read-only; never feeds back into selection.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationSummary {
    pub tick:              Tick,
    /// Priority groups entered before a candidate was found (or the list ran out).
    pub groups_walked:     usize,
    /// Definitions that passed eligibility and had contexts generated.
    pub actions_evaluated: usize,
    /// Contexts scored, excluding those with an expired target.
    pub contexts_scored:   usize,
    /// Contexts that scored above zero.
    pub candidates:        usize,
    pub winner:            Option<Winner>,
    pub outcome:           Outcome,
}

impl EvaluationSummary {
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            groups_walked:     0,
            actions_evaluated: 0,
            contexts_scored:   0,
            candidates:        0,
            winner:            None,
            outcome:           Outcome::NoCandidate,
        }
    }
}

/// The best candidate of an update, inertia bonus included.
#[derive(Clone, Debug, PartialEq)]
pub struct Winner {
    pub name:    Tag,
    pub score:   f32,
    pub context: Context,
}

/// How an update ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The acting agent no longer exists; nothing was evaluated.
    AgentGone,
    /// No eligible context scored above zero.
    NoCandidate,
    /// Nothing was running; the winner started.
    Started,
    /// The running action won again on the same context and keeps running.
    Continued,
    /// The running action was cancelled in favour of the winner, which may
    /// be the same definition bound to a different context.
    Interrupted,
    /// A different action won but the running one refused interruption.
    Deferred,
}

impl Outcome {
    /// Whether a new action started during this update.
    pub fn started_action(self) -> bool {
        matches!(self, Outcome::Started | Outcome::Interrupted)
    }
}
