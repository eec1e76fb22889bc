//! HTTP binding for the revocation workflow.
//!
//! Every failure leaves as the same "remote call failed" body carrying the
//! original message; the client code is attached as an advisory field.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tokio::time::{timeout, Duration};

use tokenward_core::error::{ClientCode, RevokeError, RpcFailure};
use tokenward_core::{RevocationRequest, RevocationResult};

use crate::app_state::AppState;

/// `RpcFailure` rendered as an HTTP response.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(pub RpcFailure);

impl From<RevokeError> for ApiError {
    fn from(err: RevokeError) -> Self {
        ApiError(err.into_rpc())
    }
}

fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::DependencyFailed | ClientCode::PublishFailed => StatusCode::BAD_GATEWAY,
        ClientCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": RpcFailure::ERROR,
            "code": self.0.code.as_str(),
            "message": self.0.message,
        }));
        (status_for(self.0.code), body).into_response()
    }
}

/// DELETE /v1/access-tokens/:id
pub async fn revoke_access_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RevocationResult>, ApiError> {
    let req = RevocationRequest::new(id)?;

    let limit_ms = state.cfg().service.request_timeout_ms;
    // Elapsed deadline drops the workflow future mid-sequence.
    let res = timeout(Duration::from_millis(limit_ms), state.workflow().revoke(req))
        .await
        .map_err(|_| {
            state.metrics().request_timeouts.inc(&[("route", "revoke")]);
            RevokeError::Timeout(limit_ms)
        })??;

    Ok(Json(res))
}
