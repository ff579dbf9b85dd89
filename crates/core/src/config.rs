//! Configuration types shared across crates.
//!
//! Database credentials deliberately do not live here: they come from the
//! fixed `DB_*` environment variables and are re-read on every invocation,
//! so a credential rotation takes effect without a restart.

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Gatekeeper configuration for the bootstrap endpoint.
///
/// When absent, the endpoint is unauthenticated (suitable only when the
/// trigger transport itself is trusted).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable holding the shared authorization secret.
    pub secret_env: String,
    /// Cached-secret time-to-live in seconds.
    #[serde(default = "default_secret_ttl_secs")]
    pub ttl_secs: u64,
    /// Retry attempts when refreshing the secret.
    #[serde(default = "default_secret_max_retries")]
    pub max_retries: u32,
}

fn default_secret_ttl_secs() -> u64 {
    300
}

fn default_secret_max_retries() -> u32 {
    3
}

/// Bootstrap behavior configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Extension to install or upgrade.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Optional environment variable holding the database password, used
    /// in place of `DB_PASSWORD` (stand-in for an external secret store).
    #[serde(default)]
    pub password_secret_env: Option<String>,
}

fn default_extension() -> String {
    "vector".to_string()
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            password_secret_env: None,
        }
    }
}

/// Top-level application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.bootstrap.extension.is_empty() {
            return Err("bootstrap.extension must not be empty".to_string());
        }
        if let Some(auth) = &self.auth {
            if auth.secret_env.is_empty() {
                return Err("auth.secret_env must not be empty".to_string());
            }
            if auth.ttl_secs == 0 {
                return Err("auth.ttl_secs must be positive".to_string());
            }
        }
        Ok(())
    }
}
