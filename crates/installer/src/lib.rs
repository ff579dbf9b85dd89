//! Idempotent installer for the PostgreSQL vector extension.
//!
//! The installer drives the cluster's extension state to
//! present-and-current under a transaction-scoped advisory lock, so any
//! number of concurrent bootstrap invocations converge on exactly one DDL
//! execution. It is fail-fast: nothing is retried internally, and a later
//! invocation may safely re-run the whole sequence from scratch.

pub mod error;
pub mod extension;
pub mod vector_table;

pub use error::{InstallError, InstallResult};
pub use extension::{ExtensionInstaller, ExtensionState};
