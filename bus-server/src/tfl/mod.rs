//! TfL Unified API client.
//!
//! Wraps the two StopPoint endpoints the server proxies:
//! - `GET /StopPoint` searches for stops around a coordinate
//! - `GET /StopPoint/{naptanId}/Arrivals` lists live arrival predictions
//!
//! Responses are projected down to the handful of fields callers need.
//! Incomplete stop records are dropped, but an incomplete arrival fails the
//! whole lookup.

mod client;
mod error;
mod project;
mod types;

pub use client::{TflClient, TflConfig};
pub use error::TflError;
pub use project::{project_predictions, project_stop_points};
pub use types::{Prediction, PredictionQuery, StopPoint, StopPoints, StopQuery};
