//! JSON request guard.
//!
//! Runs in front of every JSON endpoint: rejects bodies that are not JSON,
//! logs what came in and what went out, and hands the parsed body to the
//! handler so it is only parsed once.

use axum::{
    body::{Body, to_bytes},
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{error, info};

use super::routes::AppError;

/// Message returned for bodies that do not parse as JSON.
pub const INVALID_JSON: &str = "Invalid JSON format";

/// Largest request body accepted.
const REQUEST_BODY_LIMIT: usize = 64 * 1024;

/// Request body already parsed by [`json_guard`].
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

/// Middleware that parses the request body as JSON before dispatch.
pub async fn json_guard(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let (mut parts, body) = request.into_parts();

    let body = match to_bytes(body, REQUEST_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(%route, error = %e, "failed to read request body");
            return invalid_json();
        }
    };

    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            error!(%route, error = %e, body = %String::from_utf8_lossy(&body), "rejecting request body that is not JSON");
            return invalid_json();
        }
    };

    info!(%route, body = %value, "receive");
    parts.extensions.insert(JsonBody(value));

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (parts, body) = response.into_parts();
    let body = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(%route, error = %e, "failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    info!(
        %route,
        status = parts.status.as_u16(),
        body = %String::from_utf8_lossy(&body),
        "respond"
    );

    Response::from_parts(parts, Body::from(body))
}

fn invalid_json() -> Response {
    AppError::BadRequest {
        message: INVALID_JSON.to_string(),
    }
    .into_response()
}
