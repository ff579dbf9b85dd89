//! Application state shared across handlers.

use pgprime_core::config::AppConfig;
use pgprime_core::{EnvSecretSource, SecretCache};
use std::sync::Arc;
use std::time::Duration;

/// Environment lookup used by the bootstrap. Injectable so tests never
/// touch process environment.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Gatekeeper secret cache; `None` disables auth on the bootstrap
    /// route.
    pub auth: Option<Arc<SecretCache>>,
    pub lookup: EnvLookup,
}

impl AppState {
    /// Build state from configuration, reading credentials from the
    /// process environment at invocation time.
    pub fn new(config: AppConfig) -> Self {
        let auth = config.auth.as_ref().map(|auth_config| {
            Arc::new(SecretCache::new(
                Box::new(EnvSecretSource::new(auth_config.secret_env.clone())),
                Duration::from_secs(auth_config.ttl_secs),
                auth_config.max_retries,
            ))
        });
        if auth.is_none() {
            tracing::warn!("No auth secret configured, bootstrap endpoint is unauthenticated");
        }
        Self {
            config: Arc::new(config),
            auth,
            lookup: Arc::new(|name: &str| std::env::var(name).ok()),
        }
    }

    /// Replace the secret cache. Test entry point for injecting a mock
    /// secret source.
    pub fn with_secret_cache(mut self, cache: SecretCache) -> Self {
        self.auth = Some(Arc::new(cache));
        self
    }

    /// Replace the environment lookup. Test entry point for hermetic
    /// credential fixtures.
    pub fn with_lookup(mut self, lookup: EnvLookup) -> Self {
        self.lookup = lookup;
        self
    }
}
