//! Bearer-token gate
//!
//! Admits or rejects a request before any engine code runs. Scheme design
//! lives outside this server; the gate only compares the presented token
//! against the configured one.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use log::warn;

use crate::server::core::AppState;
use crate::server::handlers::ApiError;

pub async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    match presented {
        Some(token) if token == state.api_token.as_ref() => Ok(next.run(request).await),
        _ => {
            warn!("Rejected request to {} without valid token", request.uri());
            Err(ApiError::unauthorized())
        }
    }
}
