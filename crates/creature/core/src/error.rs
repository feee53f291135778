//! Common error infrastructure for creature-core.
//!
//! Nothing in a perception or decision tick is allowed to abort the
//! scheduler. Errors therefore exist mostly to be classified, logged and
//! replaced by a fail-closed value at the call site. Domain errors (oracle
//! access, spell lookup, cast refusal) live next to the code that raises them
//! and implement [`AiError`].

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: a gate declined this tick; the next tick may succeed
/// - **Degraded**: a collaborator or data entry is missing and a neutral
///   default was substituted
/// - **Validation**: malformed data rejected at load time
/// - **Internal**: unexpected state inconsistency worth investigating
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// A gate declined; try again on a later tick.
    ///
    /// Examples: no magicka, silenced, mid-animation
    Recoverable,

    /// A collaborator is absent and the caller fell back to a neutral value.
    ///
    /// Examples: no lighting oracle, unknown classic spell id
    Degraded,

    /// Invalid input that should be fixed at the source.
    ///
    /// Examples: a sensor profile whose wary field of view is narrower than
    /// its standard one
    Validation,

    /// Unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Degraded => "degraded",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Degraded)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all creature-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait AiError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_errors_are_recoverable_but_not_internal() {
        assert!(ErrorSeverity::Degraded.is_recoverable());
        assert!(!ErrorSeverity::Degraded.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
