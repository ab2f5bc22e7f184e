//! HTTP route handlers.

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::tfl::{Prediction, StopPoints, TflError};

use super::dto::*;
use super::guard::{JsonBody, json_guard};
use super::state::AppState;

/// Message returned whenever the upstream call fails, whatever the cause.
pub const UPSTREAM_FAILURE: &str = "Oops! something went wrong";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/stops", post(handle_stops))
        .route("/predictions", post(handle_predictions))
        .route_layer(middleware::from_fn(json_guard))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Find stops around a coordinate.
async fn handle_stops(
    State(state): State<AppState>,
    Extension(JsonBody(body)): Extension<JsonBody>,
) -> Result<Json<StopPoints>, AppError> {
    let req: StopsRequest = parse_body(&body, "/stops")?;
    let stop_points = state.tfl.find_stops(&req.location).await?;
    Ok(Json(stop_points))
}

/// Live arrival predictions for one stop.
async fn handle_predictions(
    State(state): State<AppState>,
    Extension(JsonBody(body)): Extension<JsonBody>,
) -> Result<Json<Vec<Prediction>>, AppError> {
    let req: PredictionsRequest = parse_body(&body, "/predictions")?;
    let predictions = state.tfl.find_predictions(&req.stop.naptan_id).await?;
    Ok(Json(predictions))
}

/// Pull the handler's fields out of an already-parsed body.
fn parse_body<T: DeserializeOwned>(body: &Value, route: &str) -> Result<T, AppError> {
    T::deserialize(body).map_err(|e| {
        let message = format!("Invalid parameters for POST {route}.");
        error!(error = %e, %body, "{message}");
        AppError::BadRequest { message }
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream(TflError),
}

impl From<TflError> for AppError {
    fn from(e: TflError) -> Self {
        AppError::Upstream(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            // Detail was logged where the failure happened.
            AppError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UPSTREAM_FAILURE.to_string(),
            ),
        };

        warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
