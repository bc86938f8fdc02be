//! Domain-level error type used across the round services and adapters.
//!
//! This error type is transport-agnostic. Controller entry points return
//! `Result<T, crate::error::FlowError>` and convert from `DomainError`
//! using the provided `From<DomainError> for FlowError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// A network attempt exceeded its client-side deadline.
    Timeout,
    /// The verification service answered with a non-success response
    /// or the transport failed outright.
    Upstream,
    /// The round was torn down while the operation was in flight.
    Cancelled,
    Other(String),
}

/// Input validation kinds for round interactions
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// The round is not in a phase where this action is legal.
    PhaseMismatch,
    /// The picked text does not name one of the five candidates.
    UnknownCandidate,
    /// The candidate list did not contain exactly five options.
    OptionCount,
    /// A retry was requested but there is no stored selection.
    NoSelection,
    Other(String),
}

/// Semantic conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// The round already reached its terminal outcome.
    AlreadyCompleted,
    /// A selection has already been recorded for this round.
    SelectionTaken,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Whether the retry ladder may re-run the failed operation.
    ///
    /// Only operational failures are retryable; a cancelled round never is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::Infra(InfraErrorKind::Timeout | InfraErrorKind::Upstream, _)
                | DomainError::Infra(InfraErrorKind::Other(_), _)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_and_upstream_are_retryable() {
        assert!(DomainError::infra(InfraErrorKind::Timeout, "slow").is_retryable());
        assert!(DomainError::infra(InfraErrorKind::Upstream, "503").is_retryable());
    }

    #[test]
    fn cancellation_is_not_retryable() {
        assert!(!DomainError::infra(InfraErrorKind::Cancelled, "torn down").is_retryable());
    }

    #[test]
    fn validation_is_not_retryable() {
        let err = DomainError::validation(ValidationKind::UnknownCandidate, "nope");
        assert!(!err.is_retryable());
    }
}
