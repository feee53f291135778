//! Unified error types surfaced by the runtime API.
//!
//! Ticks themselves never fail; these cover building the runtime and
//! feeding it bad input.
use creature_core::{AiError, EntityId, ErrorSeverity};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("runtime has no creatures to simulate")]
    EmptyRoster,

    #[error("agent {0} was spawned twice")]
    DuplicateAgent(EntityId),

    #[error("frame delta must be positive and finite, got {0}")]
    InvalidDelta(f32),
}

impl AiError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateAgent(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingOracles => "RUNTIME_MISSING_ORACLES",
            Self::EmptyRoster => "RUNTIME_EMPTY_ROSTER",
            Self::DuplicateAgent(_) => "RUNTIME_DUPLICATE_AGENT",
            Self::InvalidDelta(_) => "RUNTIME_INVALID_DELTA",
        }
    }
}
