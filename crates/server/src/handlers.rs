//! HTTP handlers.

use crate::run::run_bootstrap;
use crate::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use pgprime_core::EnvSecretSource;
use pgprime_core::secret::SecretSource;
use serde_json::json;

/// Liveness probe. Intentionally unauthenticated for load balancers and
/// orchestration probes.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Run the bootstrap and return the shaped outcome.
///
/// The request payload is an opaque trigger event: logged for correlation,
/// otherwise unused. The true input is the resolved environment.
pub async fn bootstrap(State(state): State<AppState>, payload: Bytes) -> impl IntoResponse {
    if !payload.is_empty() {
        let event = String::from_utf8_lossy(&payload);
        let preview: String = event.chars().take(512).collect();
        tracing::info!(event = %preview, "Bootstrap triggered");
    } else {
        tracing::info!("Bootstrap triggered");
    }

    let password_source: Option<Box<dyn SecretSource>> = state
        .config
        .bootstrap
        .password_secret_env
        .as_ref()
        .map(|var| Box::new(EnvSecretSource::new(var.clone())) as Box<dyn SecretSource>);

    let lookup = state.lookup.clone();
    let outcome = run_bootstrap(
        move |name| lookup(name),
        &state.config.bootstrap.extension,
        password_source.as_deref(),
    )
    .await;

    let status =
        StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, outcome.body)
}
