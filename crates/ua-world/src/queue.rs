//! `UpdateQueue` — FIFO of brains waiting for an update, drained under a
//! per-tick time budget.
//!
//! # Budget semantics
//!
//! The budget is checked *after* each brain update, never during one.  A
//! drain therefore always processes at least one brain (if any is queued),
//! and a slow brain can overshoot the budget.  Whatever is left stays
//! queued, in order, for the next drain.

use std::collections::VecDeque;
use std::time::Instant;

use ua_core::AgentId;

/// Millisecond time source for budget checks.
pub trait BudgetClock {
    fn now_ms(&mut self) -> f64;
}

/// [`BudgetClock`] backed by [`Instant`].
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetClock for WallClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }
}

/// Result of one [`UpdateQueue::drain`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DrainReport {
    /// Brains updated this drain.
    pub processed:  usize,
    /// Brains still queued afterwards.
    pub remaining:  usize,
    /// Budget-clock time spent, in milliseconds.
    pub elapsed_ms: f64,
}

/// FIFO queue with idempotent insertion.
#[derive(Default)]
pub struct UpdateQueue {
    order:  VecDeque<AgentId>,
    /// Membership flags indexed by `AgentId`.
    queued: Vec<bool>,
}

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `agent` unless it is already queued.  Returns whether it was
    /// added.
    pub fn queue(&mut self, agent: AgentId) -> bool {
        let idx = agent.index();
        if idx >= self.queued.len() {
            self.queued.resize(idx + 1, false);
        }
        if self.queued[idx] {
            return false;
        }
        self.queued[idx] = true;
        self.order.push_back(agent);
        true
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.queued.get(agent.index()).copied().unwrap_or(false)
    }

    /// Drop `agent` from the queue.  Returns whether it was queued.
    pub fn remove(&mut self, agent: AgentId) -> bool {
        if !self.contains(agent) {
            return false;
        }
        self.queued[agent.index()] = false;
        self.order.retain(|&a| a != agent);
        true
    }

    /// Take the oldest queued agent.
    pub fn pop(&mut self) -> Option<AgentId> {
        let agent = self.order.pop_front()?;
        self.queued[agent.index()] = false;
        Some(agent)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Queued agents, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.order.iter().copied()
    }

    /// Pop and process agents in FIFO order until the queue is empty or
    /// `budget_ms` has been spent.
    pub fn drain<C, F>(&mut self, budget_ms: f64, clock: &mut C, mut update: F) -> DrainReport
    where
        C: BudgetClock + ?Sized,
        F: FnMut(AgentId),
    {
        let start = clock.now_ms();
        let mut elapsed = 0.0;
        let mut processed = 0;

        while let Some(agent) = self.pop() {
            update(agent);
            processed += 1;
            elapsed = clock.now_ms() - start;
            if elapsed >= budget_ms {
                break;
            }
        }

        if !self.is_empty() {
            tracing::debug!(processed, remaining = self.len(), elapsed_ms = elapsed, "update budget exhausted");
        }
        DrainReport { processed, remaining: self.len(), elapsed_ms: elapsed }
    }
}
