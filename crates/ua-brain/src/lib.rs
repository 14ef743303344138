//! `ua-brain` — per-agent action selection.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`definition`] | `ActionDefinition`, `ActionSet`, `BrainSpec`                    |
//! | [`action`]     | `Action`, `ActionFactory`, `ActionLibrary`, `CompletionSignal`  |
//! | [`services`]   | `Services` — provider tables, scratch pool, engine config       |
//! | [`brain`]      | `Brain`, `ActiveAction`, `Candidate`, `pick_winner`             |
//! | [`summary`]    | `EvaluationSummary`, `Winner`, `Outcome`                        |
//! | [`error`]      | `BrainError`, `BrainResult<T>`                                  |
//!
//! # Update walk
//!
//! Definitions are sorted by ascending priority once, when the brain is
//! built.  An update walks them one priority group at a time:
//!
//! 1. skip definitions with zero weight, disabled by config, with an
//!    unregistered action kind, missing a required tag, or carrying a
//!    blocking tag;
//! 2. generate contexts for each survivor and score every context;
//! 3. stop after the first group that produced a positive score.
//!
//! The running action's candidates then get the inertia bonus (while its
//! cooldown lasts), the best candidate wins, and the brain starts it,
//! keeps the current action, or defers if the current action refuses
//! interruption.
//!
//! Completion is reported through a one-shot [`CompletionSignal`] that the
//! brain polls from [`Brain::tick`].

pub mod action;
pub mod brain;
pub mod definition;
pub mod error;
pub mod services;
pub mod summary;


pub use action::{Action, ActionFactory, ActionLibrary, CompletionSignal};
pub use brain::{ActiveAction, Brain, Candidate, pick_winner};
pub use definition::{ActionDefinition, ActionSet, BrainSpec};
pub use error::{BrainError, BrainResult};
pub use services::Services;
pub use summary::{EvaluationSummary, Outcome, Winner};
pub use ua_query::Query;
