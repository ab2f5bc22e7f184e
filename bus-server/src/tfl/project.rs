//! Projection of TfL responses down to the fields we return.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::error::TflError;
use super::types::{Prediction, RawStopPoint, StopPoint, StopPoints};

/// Project a `GET /StopPoint` response.
///
/// Records missing `stopLetter`, `naptanId` or `distance` are skipped with a
/// warning. Only a response without a `stopPoints` array is an error.
pub fn project_stop_points(body: &Value) -> Result<StopPoints, TflError> {
    let records = body
        .get("stopPoints")
        .and_then(Value::as_array)
        .ok_or_else(|| TflError::Shape {
            message: "expected an object with a `stopPoints` array".to_string(),
        })?;

    let stop_points = records
        .iter()
        .filter_map(|record| {
            let stop = project_stop_point(record);
            if stop.is_none() {
                warn!(%record, "skipping inconsistent stop point");
            }
            stop
        })
        .collect();

    Ok(StopPoints { stop_points })
}

fn project_stop_point(record: &Value) -> Option<StopPoint> {
    let raw = RawStopPoint::deserialize(record).ok()?;
    Some(StopPoint {
        stop_letter: raw.stop_letter?,
        naptan_id: raw.naptan_id?,
        distance: raw.distance?,
    })
}

/// Project a `GET /StopPoint/{id}/Arrivals` response.
///
/// Unlike stops, a single record without `lineName` or `timeToStation`
/// fails the whole projection.
pub fn project_predictions(body: &Value) -> Result<Vec<Prediction>, TflError> {
    let records = body.as_array().ok_or_else(|| TflError::Shape {
        message: "expected an array of arrivals".to_string(),
    })?;

    records
        .iter()
        .map(|record| {
            Prediction::deserialize(record).map_err(|e| TflError::Shape {
                message: format!("invalid arrival record: {e}"),
            })
        })
        .collect()
}
