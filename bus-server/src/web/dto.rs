//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::tfl::{PredictionQuery, StopQuery};

/// Body of `POST /stops`.
#[derive(Debug, Deserialize)]
pub struct StopsRequest {
    pub location: StopQuery,
}

/// Body of `POST /predictions`.
#[derive(Debug, Deserialize)]
pub struct PredictionsRequest {
    pub stop: PredictionQuery,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
