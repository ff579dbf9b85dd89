//! Credential resolution error types.

use thiserror::Error;

/// Errors produced while resolving connection credentials.
///
/// All variants are fatal for the current invocation; none are retried
/// internally. The orchestration layer logs the detail and returns a
/// generic failure to the caller.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Some but not all required variables are set. Always a
    /// misconfiguration, never silently defaulted.
    #[error("partial database credentials: present {present:?}, missing {missing:?}")]
    PartialCredentials {
        present: Vec<String>,
        missing: Vec<String>,
    },

    /// None of the required variables are set. Reported separately from
    /// the partial case so operators see "nothing configured" instead of
    /// a misleading missing-variable list.
    #[error("no database credentials configured (expected {expected:?})")]
    NoCredentials { expected: Vec<String> },

    #[error("unsupported driver '{0}': only psycopg is supported")]
    UnsupportedDriver(String),

    #[error("invalid DB_PORT '{0}': expected an integer in 1..=65535")]
    InvalidPort(String),

    #[error("invalid EMBEDDING_MODEL_DIMENSIONS '{0}': expected a positive integer")]
    InvalidDimensions(String),

    /// The external secret store failed to produce a value.
    #[error("secret retrieval failed: {0}")]
    SecretRetrieval(String),
}

/// Result type for credential operations.
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;
