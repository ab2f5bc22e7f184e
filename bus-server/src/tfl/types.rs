//! Query and response types for the StopPoint endpoints.
//!
//! Inbound queries use the camelCase names of the public JSON API. The
//! projected types serialize with the same casing TfL uses, so a projected
//! record is a strict subset of the upstream one.

use serde::{Deserialize, Serialize};

/// Parameters for a stop search around a coordinate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopQuery {
    pub latitude: f64,

    /// Older clients send the misspelt `longtitude`.
    #[serde(alias = "longtitude")]
    pub longitude: f64,

    /// Search radius in metres
    pub radius: f64,

    /// TfL stop type names, e.g. `NaptanPublicBusCoachTram`
    pub stop_types: Vec<String>,

    pub return_lines: bool,
}

/// Stop whose arrivals are requested.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionQuery {
    pub naptan_id: String,
}

/// A stop near the searched coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPoint {
    /// Letter painted on the stop flag, e.g. "L"
    pub stop_letter: String,
    pub naptan_id: String,
    /// Distance from the searched coordinate in metres
    pub distance: f64,
}

/// Response envelope for a stop search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPoints {
    pub stop_points: Vec<StopPoint>,
}

/// A live arrival prediction at a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub line_name: String,
    /// Seconds until the vehicle reaches the stop
    pub time_to_station: i64,
}

/// Upstream stop record, with only the projected fields.
///
/// Every field is optional because TfL omits `stopLetter` on some stops.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawStopPoint {
    pub stop_letter: Option<String>,
    pub naptan_id: Option<String>,
    pub distance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stop_query_accepts_misspelt_longitude() {
        let query: StopQuery = serde_json::from_value(json!({
            "latitude": 51.5,
            "longtitude": -0.12,
            "radius": 200,
            "stopTypes": ["NaptanPublicBusCoachTram"],
            "returnLines": false
        }))
        .unwrap();

        assert_eq!(query.longitude, -0.12);
        assert_eq!(query.radius, 200.0);
    }

    #[test]
    fn stop_query_requires_every_field() {
        let result = serde_json::from_value::<StopQuery>(json!({
            "latitude": 51.5,
            "longitude": -0.12,
            "stopTypes": [],
            "returnLines": true
        }));

        assert!(result.is_err());
    }

    #[test]
    fn stop_point_serializes_camel_case() {
        let stop = StopPoint {
            stop_letter: "L".into(),
            naptan_id: "490007705L".into(),
            distance: 42.5,
        };

        assert_eq!(
            serde_json::to_value(&stop).unwrap(),
            json!({"stopLetter": "L", "naptanId": "490007705L", "distance": 42.5})
        );
    }
}
