//! Core types for the pgprime bootstrap tool.
//!
//! This crate is dependency-light and holds everything that does not need a
//! database connection:
//! - Credential resolution from the environment (all-or-nothing validation)
//! - Connection parameters and connection-string building
//! - Configuration structs shared across crates
//! - TTL-cached secret retrieval with constant-time verification

pub mod config;
pub mod credentials;
pub mod error;
pub mod secret;

pub use credentials::{BootstrapMode, ConnectionParameters, CredentialSet, Driver};
pub use error::{CredentialError, CredentialResult};
pub use secret::{EnvSecretSource, SecretCache, SecretSource};
