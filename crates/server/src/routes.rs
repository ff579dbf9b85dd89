//! Route configuration.

use crate::auth::auth_middleware;
use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let guarded = Router::new()
        .route("/v1/bootstrap", post(handlers::bootstrap))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        // Health check stays outside the auth layer for probes.
        .route("/v1/health", get(handlers::health_check))
        .merge(guarded)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
