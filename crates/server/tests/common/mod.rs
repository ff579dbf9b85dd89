//! Common test utilities and fixtures.

use async_trait::async_trait;
use pgprime_core::config::AppConfig;
use pgprime_core::error::{CredentialError, CredentialResult};
use pgprime_core::{SecretCache, SecretSource};
use pgprime_server::state::EnvLookup;
use pgprime_server::{AppState, create_router};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Build an injectable environment lookup from fixed pairs.
pub fn lookup_from(pairs: &[(&str, &str)]) -> EnvLookup {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Arc::new(move |name: &str| map.get(name).cloned())
}

/// Secret source returning a fixed value, or failing when `value` is
/// `None`.
pub struct StaticSecretSource {
    value: Option<String>,
}

#[allow(dead_code)]
impl StaticSecretSource {
    pub fn new(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { value: None }
    }
}

#[async_trait]
impl SecretSource for StaticSecretSource {
    async fn fetch(&self) -> CredentialResult<String> {
        self.value
            .clone()
            .ok_or_else(|| CredentialError::SecretRetrieval("static source failure".to_string()))
    }
}

/// Router with no auth and the given credential lookup.
#[allow(dead_code)]
pub fn open_router(lookup: EnvLookup) -> axum::Router {
    let state = AppState::new(AppConfig::default()).with_lookup(lookup);
    create_router(state)
}

/// Router guarded by a fixed shared secret.
#[allow(dead_code)]
pub fn guarded_router(secret: &str, lookup: EnvLookup) -> axum::Router {
    let cache = SecretCache::new(
        Box::new(StaticSecretSource::new(secret)),
        Duration::from_secs(300),
        3,
    );
    let state = AppState::new(AppConfig::default())
        .with_secret_cache(cache)
        .with_lookup(lookup);
    create_router(state)
}
