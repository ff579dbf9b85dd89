//! Bootstrap orchestration and result shaping.
//!
//! Sequences credential resolution, connection, and the guarded install,
//! then maps every outcome onto the `{status, body}` pair the trigger
//! depends on. Failure bodies are fixed generic strings: the detailed
//! error is logged, never returned, so credentials and raw SQL errors
//! cannot leak to the caller.

use pgprime_core::credentials::ResolvedCredentials;
use pgprime_core::{BootstrapMode, CredentialSet, SecretSource};
use pgprime_installer::{ExtensionInstaller, ExtensionState};

const SUCCESS_EXTENSION: &str = "Successfully created vector extension.";
const SUCCESS_VECTOR_STORE: &str = "Successfully created vector table with pgvector extension.";
const FAILURE_EXTENSION: &str = "Failed to create vector extension.";
const FAILURE_VECTOR_STORE: &str = "Failed to create vector table with pgvector extension.";

/// Terminal result of one bootstrap invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub status: u16,
    pub body: String,
}

impl BootstrapOutcome {
    fn success(mode: BootstrapMode) -> Self {
        let body = match mode {
            BootstrapMode::Extension => SUCCESS_EXTENSION,
            BootstrapMode::VectorStore => SUCCESS_VECTOR_STORE,
        };
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    fn failure(mode: BootstrapMode) -> Self {
        let body = match mode {
            BootstrapMode::Extension => FAILURE_EXTENSION,
            BootstrapMode::VectorStore => FAILURE_VECTOR_STORE,
        };
        Self {
            status: 500,
            body: body.to_string(),
        }
    }
}

/// Run one bootstrap invocation.
///
/// `lookup` supplies the credential variables (production passes the
/// process environment); `password_source`, when present, resolves the
/// database password externally and substitutes it before validation.
/// Never fails: every error is folded into a 500 outcome after logging.
pub async fn run_bootstrap<F>(
    lookup: F,
    extension: &str,
    password_source: Option<&dyn SecretSource>,
) -> BootstrapOutcome
where
    F: Fn(&str) -> Option<String>,
{
    let mode = BootstrapMode::detect(&lookup);
    let mut set = CredentialSet::from_lookup(mode, &lookup);

    if let Some(source) = password_source {
        match source.fetch().await {
            Ok(password) => set = set.with_password(password),
            Err(err) => {
                tracing::error!(error = %err, "Database password retrieval failed");
                return BootstrapOutcome::failure(mode);
            }
        }
    }

    let resolved = match set.resolve() {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::error!(error = %err, "Credential resolution failed");
            return BootstrapOutcome::failure(mode);
        }
    };

    match install(&resolved, extension).await {
        Ok(()) => BootstrapOutcome::success(mode),
        Err(err) => {
            tracing::error!(extension, error = %err, "Bootstrap failed");
            BootstrapOutcome::failure(mode)
        }
    }
}

async fn install(
    resolved: &ResolvedCredentials,
    extension: &str,
) -> Result<(), pgprime_installer::InstallError> {
    let mut installer = ExtensionInstaller::connect(&resolved.params).await?;

    match installer.extension_state(extension).await? {
        ExtensionState::Current { version } => {
            tracing::info!(extension, version, "Extension already current");
        }
        state => {
            tracing::info!(extension, ?state, "Extension needs install or upgrade");
        }
    }

    // The transaction re-evaluates the state server-side regardless of
    // what we just observed; the check above is informational only.
    installer.install_or_upgrade(extension).await?;

    if let Some(target) = &resolved.vector_store {
        installer
            .ensure_vector_table(&target.table_name, target.dimensions)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgprime_core::CredentialError;
    use std::collections::HashMap;

    struct FailingSource;

    #[async_trait::async_trait]
    impl SecretSource for FailingSource {
        async fn fetch(&self) -> Result<String, CredentialError> {
            Err(CredentialError::SecretRetrieval(
                "store unavailable".to_string(),
            ))
        }
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[tokio::test]
    async fn partial_credentials_yield_generic_failure() {
        let outcome = run_bootstrap(
            lookup_from(&[("DB_NAME", "app"), ("DB_USER", "app")]),
            "vector",
            None,
        )
        .await;
        assert_eq!(outcome.status, 500);
        assert_eq!(outcome.body, FAILURE_EXTENSION);
    }

    #[tokio::test]
    async fn no_credentials_yield_generic_failure() {
        let outcome = run_bootstrap(|_| None, "vector", None).await;
        assert_eq!(outcome.status, 500);
        assert_eq!(outcome.body, FAILURE_EXTENSION);
    }

    #[tokio::test]
    async fn vector_store_mode_uses_table_failure_body() {
        let outcome = run_bootstrap(
            lookup_from(&[("TABLE_NAME", "embeddings")]),
            "vector",
            None,
        )
        .await;
        assert_eq!(outcome.status, 500);
        assert_eq!(outcome.body, FAILURE_VECTOR_STORE);
    }

    #[tokio::test]
    async fn failed_password_retrieval_yields_generic_failure() {
        // Complete apart from the password, which the source fails to
        // provide.
        let outcome = run_bootstrap(
            lookup_from(&[
                ("DB_NAME", "app"),
                ("DB_USER", "app"),
                ("DB_HOST", "db.local"),
                ("DB_PORT", "5432"),
            ]),
            "vector",
            Some(&FailingSource),
        )
        .await;
        assert_eq!(outcome.status, 500);
        assert_eq!(outcome.body, FAILURE_EXTENSION);
    }

    #[tokio::test]
    async fn unsupported_driver_never_attempts_a_connection() {
        // db.invalid would hang or fail slowly if a connection were
        // attempted; the driver check fails first and immediately.
        let outcome = run_bootstrap(
            lookup_from(&[
                ("DB_NAME", "app"),
                ("DB_USER", "app"),
                ("DB_HOST", "db.invalid"),
                ("DB_PORT", "5432"),
                ("DB_PASSWORD", "secret"),
                ("PGVECTOR_DRIVER", "asyncpg"),
            ]),
            "vector",
            None,
        )
        .await;
        assert_eq!(outcome.status, 500);
        assert_eq!(outcome.body, FAILURE_EXTENSION);
    }
}
