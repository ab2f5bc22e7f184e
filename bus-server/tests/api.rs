//! End-to-end tests of the HTTP surface against a fake TfL API.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;

use bus_server::tfl::{TflClient, TflConfig};
use bus_server::web::{AppState, INVALID_JSON, UPSTREAM_FAILURE, create_router};

fn app(server: &MockServer) -> Router {
    let config = TflConfig::new("test-id", "test-key").with_base_url(server.base_url());
    let client = TflClient::new(config).expect("client");
    create_router(AppState::new(client))
}

async fn post(app: Router, path: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(body.into())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).expect("JSON response");
    (status, value)
}

fn stops_body() -> String {
    json!({
        "location": {
            "latitude": 51.5142,
            "longitude": -0.0755,
            "radius": 200,
            "stopTypes": ["NaptanPublicBusCoachTram"],
            "returnLines": false
        }
    })
    .to_string()
}

#[tokio::test]
async fn predictions_are_projected() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/StopPoint/490007705L/Arrivals")
                .query_param("mode", "bus");
            then.status(200).json_body(json!([{
                "lineName": "25",
                "timeToStation": 120,
                "destinationName": "Ilford",
                "expectedArrival": "2026-10-18T09:02:00Z"
            }]));
        })
        .await;

    let (status, body) = post(
        app(&server),
        "/predictions",
        r#"{"stop":{"naptanId":"490007705L"}}"#,
    )
    .await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"lineName": "25", "timeToStation": 120}]));
}

#[tokio::test]
async fn incomplete_prediction_fails_request() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/StopPoint/490007705L/Arrivals");
            then.status(200).json_body(json!([
                {"lineName": "25", "timeToStation": 120},
                {"timeToStation": 300}
            ]));
        })
        .await;

    let (status, body) = post(
        app(&server),
        "/predictions",
        r#"{"stop":{"naptanId":"490007705L"}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": UPSTREAM_FAILURE}));
}

#[tokio::test]
async fn incomplete_stop_is_dropped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/StopPoint");
            then.status(200).json_body(json!({
                "centrePoint": [51.5142, -0.0755],
                "stopPoints": [
                    {"stopLetter": "L", "naptanId": "490007705L", "distance": 31.2, "commonName": "Aldgate"},
                    {"stopLetter": "M", "naptanId": "490007705M", "commonName": "Aldgate"}
                ]
            }));
        })
        .await;

    let (status, body) = post(app(&server), "/stops", stops_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"stopPoints": [{"stopLetter": "L", "naptanId": "490007705L", "distance": 31.2}]})
    );
}

#[tokio::test]
async fn upstream_503_is_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/StopPoint");
            then.status(503).body("Service Unavailable");
        })
        .await;

    let (status, body) = post(app(&server), "/stops", stops_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Oops! something went wrong"}));
}

#[tokio::test]
async fn invalid_json_is_400_on_both_endpoints() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!([]));
        })
        .await;

    for path in ["/stops", "/predictions"] {
        for bad in ["", "{", "stop=490007705L", r#"{"stop": {"naptanId": }}"#] {
            let (status, body) = post(app(&server), path, bad).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path} with {bad:?}");
            assert_eq!(body, json!({"error": INVALID_JSON}));
        }
    }

    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn stops_missing_location_field_is_400() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({"stopPoints": []}));
        })
        .await;

    let full: Value = serde_json::from_str(&stops_body()).unwrap();
    for field in ["latitude", "longitude", "radius", "stopTypes", "returnLines"] {
        let mut body = full.clone();
        body["location"].as_object_mut().unwrap().remove(field);

        let (status, response) = post(app(&server), "/stops", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert_eq!(
            response,
            json!({"error": "Invalid parameters for POST /stops."})
        );
    }

    let (status, _) = post(app(&server), "/stops", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn predictions_missing_naptan_id_is_400() {
    let server = MockServer::start_async().await;

    for body in [r#"{}"#, r#"{"stop":{}}"#, r#"{"naptanId":"490007705L"}"#, "null"] {
        let (status, response) = post(app(&server), "/predictions", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(
            response,
            json!({"error": "Invalid parameters for POST /predictions."})
        );
    }
}

#[tokio::test]
async fn health_needs_no_body() {
    let server = MockServer::start_async().await;

    let response = app(&server)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
