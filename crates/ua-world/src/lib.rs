//! `ua-world` — tick loop orchestrator for the `ua` framework.
//!
//! # Two-phase tick loop
//!
//! ```text
//! every tick:
//!   ① Brain tick — for each brain in ascending AgentId order:
//!                   decay inertia cooldown, advance the running action,
//!                   poll its completion; queue the brain if its interval
//!                   elapsed or its action just completed.
//!   ② Drain      — pop queued brains FIFO and run Brain::update, checking
//!                   the budget after each one; leftovers wait a tick.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let (store, rngs) = AgentStoreBuilder::new(42).agents(100, spawn_at).build();
//! let mut services = Services::new(config);
//! services.inputs.register_fn("Distance", distance)?;
//! services.actions.register_fn("Wander", |_| Box::new(Wander::default()) as Box<dyn Action>)?;
//! let mut world = WorldBuilder::new(services, store, rngs)
//!     .brain_for_all(spec)
//!     .build()?;
//! world.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod queue;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use error::{WorldError, WorldResult};
pub use observer::{NoopObserver, WorldObserver};
pub use queue::{BudgetClock, DrainReport, UpdateQueue, WallClock};
pub use world::World;
