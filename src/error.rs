//! Error types for the country-verify crate.
//!
//! All errors carry stable string messages suitable for API responses and
//! log lines. The variants map directly onto the propagation policy: only
//! [`VerifyError::NotFound`] and persistence write failures are fatal for a
//! single-pair run; everything else degrades.

/// Errors that can occur during a verification run.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The broker or country could not be resolved in the catalog.
    #[error("not found: {0}")]
    NotFound(String),

    /// A search query failed. Recovered by the orchestrator; degrades
    /// result quality rather than aborting the run.
    #[error("search unavailable: {0}")]
    SearchUnavailable(String),

    /// The persistence collaborator failed. Read failures degrade to a
    /// cache miss; write failures are fatal for the affected pair.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Appending the audit log entry failed. Logged and swallowed.
    #[error("audit log error: {0}")]
    AuditLog(String),

    /// Invalid verification configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for country-verify results.
pub type Result<T> = std::result::Result<T, VerifyError>;
