use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, ValidationKind};
use crate::errors::ErrorCode;

/// Crate-level error returned by the round controller's entry points.
///
/// Domain failures are converted via `From<DomainError>`; the embedding
/// game reads `code()`/`detail()` when mirroring an error into its store.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Verification error: {detail}")]
    Verification { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl FlowError {
    /// Helper method to extract the error code from any variant
    pub fn code(&self) -> ErrorCode {
        match self {
            FlowError::Validation { code, .. } => *code,
            FlowError::Conflict { code, .. } => *code,
            FlowError::Verification { code, .. } => *code,
            FlowError::Config { .. } => ErrorCode::ConfigError,
            FlowError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Helper method to extract the error detail from any variant
    pub fn detail(&self) -> &str {
        match self {
            FlowError::Validation { detail, .. } => detail,
            FlowError::Conflict { detail, .. } => detail,
            FlowError::Verification { detail, .. } => detail,
            FlowError::Config { detail } => detail,
            FlowError::Internal { detail } => detail,
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn verification(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Verification {
            code,
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for FlowError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                    ValidationKind::UnknownCandidate => ErrorCode::UnknownCandidate,
                    ValidationKind::OptionCount => ErrorCode::InvalidOptionCount,
                    ValidationKind::NoSelection => ErrorCode::NoSelection,
                    _ => ErrorCode::Internal,
                };
                FlowError::Validation { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::AlreadyCompleted => ErrorCode::RoundCompleted,
                    ConflictKind::SelectionTaken => ErrorCode::SelectionTaken,
                    _ => ErrorCode::Internal,
                };
                FlowError::Conflict { code, detail }
            }
            DomainError::Infra(kind, detail) => {
                let code = match kind {
                    InfraErrorKind::Timeout => ErrorCode::VerifyTimeout,
                    InfraErrorKind::Upstream => ErrorCode::VerifyUpstream,
                    InfraErrorKind::Cancelled => ErrorCode::RoundCancelled,
                    _ => ErrorCode::VerifyUpstream,
                };
                FlowError::Verification { code, detail }
            }
        }
    }
}
