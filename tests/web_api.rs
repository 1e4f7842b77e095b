//! HTTP surface tests driven through the router without binding a socket

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use energy_optimizer::web::{build_router, AppState};
use energy_optimizer::{EnergyOptimizationNetwork, NetworkVariant, NetworkWeights};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use tower::ServiceExt;

fn zero_weight_app() -> Router {
    let network = EnergyOptimizationNetwork::from_weights(NetworkWeights::zeroed(), NetworkVariant::Detailed);
    build_router(AppState::new(network, StdRng::seed_from_u64(1)), false)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn desert_body() -> Value {
    json!({
        "latitude": 33.55,
        "longitude": -116.26,
        "sunlightHours": 10.5,
        "windSpeed": 15,
        "temperatureRange": 30,
        "elevation": 100,
        "waterProximity": 0.1
    })
}

#[tokio::test]
async fn recommend_returns_wrapped_recommendation() {
    let (status, body) = send(zero_weight_app(), post_json("/api/recommend", desert_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["evaluationId"].is_string());
    assert!(body["evaluatedAt"].is_string());

    let rec = &body["recommendation"];
    assert_eq!(
        rec["recommendation"],
        "Moderately Suitable for Renewable Energy Installation"
    );
    assert_eq!(rec["confidence"], 50.0);
    assert_eq!(rec["energyType"]["type"], "Solar");
    assert_eq!(rec["calculations"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn versioned_alias_matches() {
    let (status, body) = send(zero_weight_app(), post_json("/v1/recommend", desert_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"]["confidence"], 50.0);
}

#[tokio::test]
async fn missing_field_is_bad_request() {
    let mut body = desert_body();
    body.as_object_mut().unwrap().remove("elevation");

    let (status, body) = send(zero_weight_app(), post_json("/api/recommend", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("elevation"));
}

#[tokio::test]
async fn non_numeric_field_is_bad_request() {
    let mut body = desert_body();
    body["windSpeed"] = json!("breezy");

    let (status, body) = send(zero_weight_app(), post_json("/api/recommend", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("windSpeed"));
}

#[tokio::test]
async fn network_view_lists_connections() {
    let (status, body) = send(zero_weight_app(), get("/api/network")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["variant"], "detailed");
    assert_eq!(body["connections"].as_array().unwrap().len(), 40);
    assert_eq!(body["inputRanges"][5]["field"], "elevation");
    assert_eq!(body["inputRanges"][5]["max"], 5000.0);
    assert_eq!(body["weights"]["inputToHidden"].as_array().unwrap().len(), 35);
}

#[tokio::test]
async fn randomize_replaces_zero_weights() {
    let (status, body) = send(zero_weight_app(), post_json("/api/network/randomize", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    let weights = body["weights"]["hiddenToOutput"].as_array().unwrap();
    assert!(weights.iter().any(|w| w.as_f64().unwrap() != 0.0));
    assert!(weights
        .iter()
        .all(|w| (-1.0..1.0).contains(&w.as_f64().unwrap())));
}

#[tokio::test]
async fn presets_and_health() {
    let (status, body) = send(zero_weight_app(), get("/api/presets")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[2]["inputs"]["waterProximity"], 1.0);

    let (status, body) = send(zero_weight_app(), get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
