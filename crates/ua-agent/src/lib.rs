//! `ua-agent` — Structure-of-Arrays agent storage for the `ua` framework.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`builder`]     | `AgentStoreBuilder`, `AgentSpawn`                         |
//! | [`view`]        | `WorldView<'a>` — read-only snapshot handed to providers  |
//!
//! The engine never writes agent state during an update.  Providers read
//! locations and tags through `WorldView`; the host mutates the store
//! between ticks.

pub mod builder;
pub mod store;
pub mod view;


pub use builder::{AgentSpawn, AgentStoreBuilder};
pub use store::{AgentRngs, AgentStore};
pub use view::WorldView;
