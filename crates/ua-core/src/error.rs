//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `UaError` as one
//! variant via `#[from]`.  Runtime lookup misses (unknown input or query
//! tags) are never errors: they are logged and degraded to defaults by the
//! registries.  `UaError` covers construction-time problems only.

use thiserror::Error;

use crate::{AgentHandle, AgentId, Tag};

/// The top-level error type for `ua-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum UaError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent handle {0} is stale")]
    StaleHandle(AgentHandle),

    #[error("{kind} provider already registered for tag `{tag}`")]
    DuplicateProvider { kind: &'static str, tag: Tag },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ua-*` crates.
pub type UaResult<T> = Result<T, UaError>;
