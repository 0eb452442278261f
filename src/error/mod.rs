//! Error handling module.
//!
//! Failures that cross the engine boundary are rendered into structured
//! outcomes (`GeneratedName`, `ConflictResolutionOutcome`); the enums here
//! carry the internal plumbing between the pipeline and its collaborators.

use std::time::Duration;

/// Engine-level error type.
///
/// Every variant renders into a descriptive failure message on the
/// generation response; none of them escapes the pipeline as a panic.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Requested resource type is not configured.
    #[error("resource type not found: {0}")]
    UnknownResourceType(String),

    /// Requested resource type exists but is disabled.
    #[error("resource type is disabled: {0}")]
    DisabledResourceType(String),

    /// No enabled naming components are configured.
    #[error("no enabled naming components are configured")]
    NoComponents,

    /// Active delimiter is not one of the supported separators.
    #[error("unsupported delimiter {0:?}: expected \"-\", \"_\", \".\", or \"\"")]
    InvalidDelimiter(String),

    /// Configuration catalog or history collaborator failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Existence oracle failed or timed out.
    #[error("existence check failed: {0}")]
    Oracle(#[from] OracleError),
}

/// Error raised by configuration catalog and history collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Backing store could not be reached.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Backing store returned malformed data.
    #[error("provider data error: {0}")]
    Data(String),
}

/// Error raised at the existence-oracle boundary.
///
/// Any of these means "unknown, do not assume uniqueness": resolution
/// strategies must never treat an oracle failure as name availability.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Existence check exceeded the configured per-call timeout.
    #[error("existence check timed out after {0:?}")]
    Timeout(Duration),

    /// Transport-level failure talking to the provider.
    #[error("provider request failed: {0}")]
    Transport(String),

    /// Provider answered but rejected the request.
    #[error("provider rejected the request: {0}")]
    Rejected(String),
}

/// Result type alias using `EngineError`.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Result type alias using `ProviderError`.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Result type alias using `OracleError`.
pub type OracleResult<T> = std::result::Result<T, OracleError>;
