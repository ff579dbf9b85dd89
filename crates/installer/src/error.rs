//! Extension installer error types.

use thiserror::Error;

/// Errors from the extension installer.
///
/// `Database` wraps the original driver error text; it is logged by the
/// caller and propagated, never reported as partial success.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("database error during extension install: {0}")]
    Database(#[from] sqlx::Error),

    /// DDL cannot take bind parameters, so extension and table names are
    /// restricted to plain identifiers before being spliced into SQL.
    #[error("invalid identifier '{0}': expected [a-z_][a-z0-9_]* of at most 63 chars")]
    InvalidIdentifier(String),

    #[error("invalid embedding dimensions {0}: must be in 1..=16000")]
    InvalidDimensions(u16),

    /// The cluster has no package for this extension at all, so no amount
    /// of retrying this invocation will help.
    #[error("extension '{0}' is not available on this cluster")]
    ExtensionUnavailable(String),
}

/// Result type for installer operations.
pub type InstallResult<T> = std::result::Result<T, InstallError>;
