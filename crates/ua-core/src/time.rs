//! Simulation time model and engine configuration.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter, one
//! tick per host frame.  The mapping to simulated seconds is held in
//! `SimClock`:
//!
//!   elapsed_secs = tick * tick_duration_secs
//!
//! Brains accumulate per-frame deltas (inertia cooldown, time since last
//! update) in seconds; the scheduler budget is measured in wall-clock
//! milliseconds and is independent of simulated time.

use std::fmt;

use crate::{TagSet, UaError, UaResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds one tick represents.  Default: 1/30 s.
    pub tick_duration_secs: f32,
    /// The current tick, advanced by `SimClock::advance()` each frame.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: f32) -> Self {
        Self { tick_duration_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_duration_secs as f64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── TieBreak ──────────────────────────────────────────────────────────────────

/// How the brain picks among candidates that share the maximum score.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// First candidate in evaluation order: priority group, then definition
    /// order, then context expansion order.
    #[default]
    First,
    /// Uniform pick among the tied maxima using the agent's `AgentRng`.
    Seeded,
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level engine configuration.
///
/// Typically loaded from a JSON file by the host application and passed to
/// the world builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Simulated seconds per tick.
    pub tick_duration_secs: f32,

    /// Total ticks for a bounded run (`World::run`).  Ignored by `World::tick`.
    pub total_ticks: u64,

    /// Wall-clock milliseconds per tick that the scheduler may spend on
    /// brain updates.  Checked after each whole brain update.
    pub budget_ms: f64,

    /// Seconds between a brain's periodic self-queue requests.
    pub update_interval_secs: f32,

    /// Fraction of `update_interval_secs` (in `[0, 1]`) used to randomly
    /// offset each brain's first update.  `0` disables jitter.
    pub interval_jitter: f32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Tie-break policy among equally scored candidates.
    pub tie_break: TieBreak,

    /// Excluded from every brain.  Matched against both the definition name
    /// and its action kind.
    pub disabled_actions: TagSet,

    /// Value an unregistered input tag resolves to.
    pub missing_input_default: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:    1.0 / 30.0,
            total_ticks:           0,
            budget_ms:             2.0,
            update_interval_secs:  0.5,
            interval_jitter:       0.0,
            seed:                  0,
            tie_break:             TieBreak::First,
            disabled_actions:      TagSet::new(),
            missing_input_default: 0.0,
        }
    }
}

impl EngineConfig {
    /// The tick at which a bounded run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }

    /// Reject values that would stall or corrupt the tick loop.
    pub fn validate(&self) -> UaResult<()> {
        if !(self.tick_duration_secs > 0.0) {
            return Err(UaError::Config(format!(
                "tick_duration_secs must be positive, got {}",
                self.tick_duration_secs
            )));
        }
        if !(self.budget_ms >= 0.0) {
            return Err(UaError::Config(format!(
                "budget_ms must be non-negative, got {}",
                self.budget_ms
            )));
        }
        if !(self.update_interval_secs >= 0.0) {
            return Err(UaError::Config(format!(
                "update_interval_secs must be non-negative, got {}",
                self.update_interval_secs
            )));
        }
        if !(0.0..=1.0).contains(&self.interval_jitter) {
            return Err(UaError::Config(format!(
                "interval_jitter must be in [0, 1], got {}",
                self.interval_jitter
            )));
        }
        Ok(())
    }
}
