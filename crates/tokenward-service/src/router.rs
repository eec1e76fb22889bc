//! Axum router wiring.
//!
//! Exposes the revoke route plus operational endpoints.

use axum::{
    routing::{delete, get},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/access-tokens/:id", delete(transport::http::revoke_access_token))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
