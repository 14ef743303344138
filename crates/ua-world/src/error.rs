use thiserror::Error;

use ua_brain::BrainError;
use ua_core::{AgentId, UaError};

#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Core(#[from] UaError),

    #[error(transparent)]
    Brain(#[from] BrainError),

    #[error("agent {0} already has a brain")]
    DuplicateBrain(AgentId),
}

pub type WorldResult<T> = Result<T, WorldError>;
