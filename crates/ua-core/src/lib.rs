//! `ua-core` — foundational types for the `ua` utility-AI framework.
//!
//! This crate is a dependency of every other `ua-*` crate.  It intentionally
//! has no `ua-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde` and `rustc-hash`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `AgentHandle`                              |
//! | [`tag`]         | `Tag`, `TagSet`, `TagMap`, `TagHashSet`               |
//! | [`geo`]         | `Vec3`, `Rotator`                                     |
//! | [`time`]        | `Tick`, `SimClock`, `EngineConfig`, `TieBreak`        |
//! | [`rng`]         | `AgentRng` (per-agent)                                |
//! | [`param`]       | `Parameter`, `Params`, `ParamValues`                  |
//! | [`context`]     | `Context`, `CustomValue`                              |
//! | [`miss_log`]    | `MissLog` — once-per-tag lookup-miss reporting        |
//! | [`error`]       | `UaError`, `UaResult`                                 |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `serde`   | Adds `Serialize`/`Deserialize` to all public types.      |
//! | `fx-hash` | `TagMap`/`TagHashSet` use `rustc-hash` instead of SipHash. |

pub mod context;
pub mod error;
pub mod geo;
pub mod ids;
pub mod miss_log;
pub mod param;
pub mod rng;
pub mod tag;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use context::{Context, CustomValue};
pub use error::{UaError, UaResult};
pub use geo::{Rotator, Vec3};
pub use ids::{AgentHandle, AgentId};
pub use miss_log::MissLog;
pub use param::{ParamValues, Parameter, Params};
pub use rng::AgentRng;
pub use tag::{Tag, TagHashSet, TagMap, TagSet};
pub use time::{EngineConfig, SimClock, Tick, TieBreak};
