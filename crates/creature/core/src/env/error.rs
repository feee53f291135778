//! Oracle access errors.

use crate::error::{AiError, ErrorSeverity};

/// Errors that occur when a collaborator is not wired into the [`Env`](super::Env).
///
/// Unlike a rules engine, a creature can keep going without its senses: every
/// caller converts these into a fail-closed value (neutral light, no hit,
/// not detected) and logs at debug level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// LightingOracle is not available in the environment.
    #[error("LightingOracle not available")]
    LightingNotAvailable,

    /// PhysicsOracle is not available in the environment.
    #[error("PhysicsOracle not available")]
    PhysicsNotAvailable,

    /// WorldOracle is not available in the environment.
    #[error("WorldOracle not available")]
    WorldNotAvailable,

    /// The lighting backend failed to sample a color.
    #[error("lighting sample failed: {0}")]
    SampleFailed(String),
}

impl AiError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Degraded
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            LightingNotAvailable => "ORACLE_LIGHTING_NOT_AVAILABLE",
            PhysicsNotAvailable => "ORACLE_PHYSICS_NOT_AVAILABLE",
            WorldNotAvailable => "ORACLE_WORLD_NOT_AVAILABLE",
            SampleFailed(_) => "ORACLE_SAMPLE_FAILED",
        }
    }
}
