//! HTTP trigger surface for the pgvector bootstrap.
//!
//! This crate wires the credential resolver and extension installer behind
//! a minimal control plane:
//! - `POST /v1/bootstrap` runs the bootstrap and returns the shaped outcome
//! - `GET /v1/health` liveness probe
//! - optional shared-secret gatekeeping on the bootstrap route

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod run;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use run::{BootstrapOutcome, run_bootstrap};
pub use state::AppState;
