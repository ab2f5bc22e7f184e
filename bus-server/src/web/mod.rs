//! Web layer for the bus proxy.
//!
//! Provides the JSON endpoints for stop search and arrival predictions.

mod dto;
mod guard;
mod routes;
mod state;

pub use dto::*;
pub use guard::{INVALID_JSON, JsonBody, json_guard};
pub use routes::{AppError, UPSTREAM_FAILURE, create_router};
pub use state::AppState;
