use thiserror::Error;

use ua_core::{AgentId, Tag, UaError};

#[derive(Debug, Error)]
pub enum BrainError {
    #[error("agent {0} does not exist")]
    DeadAgent(AgentId),

    #[error("action definition `{name}` is invalid: {reason}")]
    InvalidDefinition { name: Tag, reason: String },

    #[error(transparent)]
    Core(#[from] UaError),
}

pub type BrainResult<T> = Result<T, BrainError>;
