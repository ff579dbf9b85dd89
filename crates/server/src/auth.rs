//! Shared-secret gatekeeping for the bootstrap route.
//!
//! A deliberately simple scheme: the whole `Authorization` header value is
//! compared against a TTL-cached secret in constant time. Anything short
//! of an exact match is a 401; the reason is logged, never echoed.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

/// Middleware guarding the bootstrap route. Passes requests through when
/// no auth secret is configured.
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(cache) = &state.auth else {
        return Ok(next.run(req).await);
    };

    let Some(presented) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        tracing::warn!("Missing Authorization header");
        return Err(ApiError::Unauthorized);
    };

    match cache.verify(presented).await {
        Ok(true) => {
            tracing::debug!("Authorization accepted");
            Ok(next.run(req).await)
        }
        Ok(false) => {
            tracing::warn!("Authorization denied");
            Err(ApiError::Unauthorized)
        }
        Err(err) => {
            // A gatekeeper that cannot load its secret fails closed.
            tracing::error!(error = %err, "Authorization secret unavailable");
            Err(ApiError::Unauthorized)
        }
    }
}
