//! Integration tests for the HTTP endpoint.
//!
//! Requests go through the full router (CORS layer included) via
//! `tower::ServiceExt::oneshot`, no socket involved.
//!
//! Run with: `cargo test --test server_integration`

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use shiptrack::airport::AirportTable;
use shiptrack::geo::ReferencePoint;
use shiptrack::history::PositionHistory;
use shiptrack::position::PositionRecord;
use shiptrack::provider::{BoxFuture, PositionAdapter};
use shiptrack::resolver::{EstimatedPosition, Resolver};
use shiptrack::server::{create_router, ServerState};
use shiptrack::tracker::ShipTracker;
use shiptrack::travel::{FlightTable, TravelSettings};

/// Adapter with a fixed answer.
struct FixedAdapter(Option<(f64, f64)>);

impl PositionAdapter for FixedAdapter {
    fn name(&self) -> &str {
        "Fixed"
    }

    fn fetch<'a>(&'a self, target_id: &'a str) -> BoxFuture<'a, Option<PositionRecord>> {
        Box::pin(async move {
            self.0.map(|(lat, lon)| {
                PositionRecord::new(target_id, "TEST VESSEL", lat, lon, "Fixed")
                    .with_speed(11.2)
                    .with_course(73.0)
                    .with_status("Under way")
            })
        })
    }
}

fn app(fix: Option<(f64, f64)>, serve_fallback: bool) -> Router {
    let resolver = Resolver::new(
        vec![Box::new(FixedAdapter(fix))],
        PositionHistory::in_memory(10),
        ReferencePoint::new("Home", 51.4816, -0.1297),
        EstimatedPosition::default(),
        "TEST VESSEL",
    );
    let tracker = ShipTracker::new(
        resolver,
        "235109357",
        AirportTable::builtin(),
        FlightTable::builtin(),
        TravelSettings::default(),
    );
    create_router(ServerState {
        tracker: Arc::new(tracker),
        serve_fallback,
    })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::ORIGIN, "https://example.org")
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ship_data_returns_live_record() {
    let response = app(Some((35.08466, 129.10211)), false)
        .oneshot(get("/ship-data"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );

    let body = json_body(response).await;
    assert_eq!(body["mmsi"], "235109357");
    assert_eq!(body["name"], "TEST VESSEL");
    assert_eq!(body["latitude"], 35.08466);
    assert_eq!(body["longitude"], 129.10211);
    assert_eq!(body["speed"], 11.2);
    assert_eq!(body["course"], 73.0);
    assert_eq!(body["status"], "Under way");
    assert_eq!(body["source"], "Fixed");
    assert_eq!(body["isLastKnown"], false);
    assert_eq!(body["isEstimated"], false);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_root_path_serves_same_payload() {
    let response = app(Some((36.1, -5.4)), false)
        .oneshot(get("/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["latitude"], 36.1);
}

#[tokio::test]
async fn test_no_live_source_is_not_found() {
    let response = app(None, false).oneshot(get("/ship-data")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

    let body = json_body(response).await;
    assert_eq!(body["error"], "Ship data not found");
    assert!(body["message"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_fallback_served_when_enabled() {
    let response = app(None, true).oneshot(get("/ship-data")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["isEstimated"], true);
    assert_eq!(body["source"], "Estimated");
}

#[tokio::test]
async fn test_preflight_is_allowed() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/ship-data")
        .header(header::ORIGIN, "https://example.org")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app(None, false).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("GET"));
    assert!(methods.contains("OPTIONS"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let response = app(Some((36.1, -5.4)), false)
        .oneshot(get("/elsewhere"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
