//! TTL-cached secret retrieval.
//!
//! The cache is an explicit, injectable object rather than process-wide
//! mutable state: callers construct a `SecretCache` around whatever
//! `SecretSource` their deployment uses and share it. A refresh that
//! exhausts its retries falls back to the previously cached value when one
//! exists, so a flaky secret store degrades to staleness instead of outage.

use crate::error::{CredentialError, CredentialResult};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Provider of a secret value. The transport (secret-store client, file,
/// env var) lives behind this trait; retry policy belongs to the cache.
#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn fetch(&self) -> CredentialResult<String>;
}

/// Secret source reading a named environment variable on every fetch.
pub struct EnvSecretSource {
    var: String,
}

impl EnvSecretSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl SecretSource for EnvSecretSource {
    async fn fetch(&self) -> CredentialResult<String> {
        std::env::var(&self.var)
            .map_err(|_| CredentialError::SecretRetrieval(format!("env var {} not set", self.var)))
    }
}

/// A cached secret value with its fetch time.
struct CachedSecret {
    value: String,
    fetched_at: Instant,
}

/// TTL cache over a [`SecretSource`] with bounded retry and backoff.
pub struct SecretCache {
    source: Box<dyn SecretSource>,
    ttl: Duration,
    max_retries: u32,
    retry_backoff: Duration,
    state: Mutex<Option<CachedSecret>>,
}

impl SecretCache {
    /// Default time-to-live for a cached secret (matches the upstream
    /// 5-minute authorizer cache).
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    pub fn new(source: Box<dyn SecretSource>, ttl: Duration, max_retries: u32) -> Self {
        Self {
            source,
            ttl,
            max_retries,
            retry_backoff: Duration::from_millis(200),
            state: Mutex::new(None),
        }
    }

    /// Override the base backoff between retry attempts (doubles per
    /// attempt). Mainly for tests.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Get the secret, refreshing from the source when the cached value is
    /// absent or older than the TTL.
    pub async fn get(&self) -> CredentialResult<String> {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref()
            && cached.fetched_at.elapsed() <= self.ttl
        {
            return Ok(cached.value.clone());
        }

        let mut last_err = None;
        for attempt in 1..=self.max_retries.max(1) {
            match self.source.fetch().await {
                Ok(value) => {
                    *state = Some(CachedSecret {
                        value: value.clone(),
                        fetched_at: Instant::now(),
                    });
                    return Ok(value);
                }
                Err(err) => {
                    tracing::warn!(
                        attempt,
                        max_retries = self.max_retries,
                        error = %err,
                        "Failed to refresh secret"
                    );
                    last_err = Some(err);
                    if attempt < self.max_retries {
                        tokio::time::sleep(self.retry_backoff * 2u32.pow(attempt - 1)).await;
                    }
                }
            }
        }

        // Refresh exhausted: serve the stale value if we ever had one.
        if let Some(cached) = state.as_ref() {
            tracing::warn!("Serving stale secret after failed refresh");
            return Ok(cached.value.clone());
        }

        Err(last_err
            .unwrap_or_else(|| CredentialError::SecretRetrieval("no attempts made".to_string())))
    }

    /// Compare a presented token against the cached secret.
    ///
    /// Both sides are hashed with SHA-256 and the digests compared, so the
    /// comparison cost is independent of where the strings first differ
    /// and of the secret's length.
    pub async fn verify(&self, presented: &str) -> CredentialResult<bool> {
        let secret = self.get().await?;
        let expected = Sha256::digest(secret.as_bytes());
        let actual = Sha256::digest(presented.as_bytes());
        Ok(expected == actual)
    }
}
