//! HTTP contract tests, driven through the router with `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use adpulse_core::Config;
use adpulse_server::{build_router, AppState};

fn app() -> Router {
    let config = Config::from_lookup(&|_: &str| None);
    let state = AppState::from_config(config).unwrap();
    build_router(Arc::new(state))
}

async fn send(req: Request<Body>) -> (StatusCode, Value) {
    let resp = app().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn zero_conversion_bundle() -> Value {
    json!({
        "spend_last_4h": 9600.0,
        "conversions_last_4h": 0,
        "daily_spend": 48000.0,
        "daily_budget": 50000.0,
        "current_cpm": 100.0,
        "average_cpm": 100.0,
        "current_ctr": 3.0,
        "average_ctr": 3.0
    })
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["profile"], "default");
}

#[tokio::test]
async fn thresholds_are_the_defaults() {
    let (status, body) = get("/thresholds").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overspend_tolerance"], 0.2);
    assert_eq!(body["zero_conversion_spend_floor"], 5000.0);
}

#[tokio::test]
async fn evaluate_reports_zero_conversions() {
    let (status, body) = post("/evaluate", zero_conversion_bundle()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "anomalies");
    assert_eq!(body["alert_count"], 1);
    assert_eq!(body["alerts"][0]["rule"], "A");
    assert_eq!(body["alerts"][0]["severity"], "Critical (P0)");
    assert_eq!(body["evidence"].as_array().unwrap().len(), 4);
    assert!(body.get("live").is_none());
    assert!(body["evaluation_id"].is_string());
}

#[tokio::test]
async fn healthy_bundle_is_nominal() {
    let mut bundle = zero_conversion_bundle();
    bundle["conversions_last_4h"] = json!(3);
    let (status, body) = post("/evaluate", bundle).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "nominal");
    assert_eq!(body["alerts"], json!([]));
}

#[tokio::test]
async fn negative_bundle_is_unprocessable() {
    let mut bundle = zero_conversion_bundle();
    bundle["daily_spend"] = json!(-1.0);
    let (status, body) = post("/evaluate", bundle).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("daily_spend"));
}

#[tokio::test]
async fn bundle_missing_field_is_json_error() {
    let mut bundle = zero_conversion_bundle();
    bundle.as_object_mut().unwrap().remove("average_ctr");
    let (status, body) = post("/evaluate", bundle).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("average_ctr"));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) = send(
        Request::post("/evaluate")
            .header("content-type", "application/json")
            .body(Body::from("{\"spend_last_4h\": "))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn rows_without_rows_key_is_json_error() {
    let (status, body) = post("/evaluate/rows", json!({ "daily_budget": 1.0 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("rows"));
}

#[tokio::test]
async fn invalid_seed_is_json_error() {
    let (status, body) = get("/scenarios/normal/evaluate?seed=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn form_lists_missing_fields() {
    let (status, body) = post("/evaluate/form", json!({ "spend_last_4h": 100.0 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 7);
    assert_eq!(fields[0]["field"], "conversions_last_4h");
    assert_eq!(fields[0]["message"], "required");
}

#[tokio::test]
async fn complete_form_is_evaluated() {
    let (status, body) = post("/evaluate/form", zero_conversion_bundle()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alerts"][0]["rule"], "A");
}

#[tokio::test]
async fn rows_are_aggregated_with_live_metrics() {
    let rows: Vec<Value> = (0..16)
        .map(|i| {
            json!({
                "timestamp": format!("2025-03-01T{:02}:{:02}:00Z", 8 + i / 4, (i % 4) * 15),
                "spend": 600.0,
                "impressions": 6000.0,
                "clicks": 180.0,
                "conversions": 0
            })
        })
        .collect();
    let request = json!({ "rows": rows, "daily_budget": 5000.0 });
    let (status, body) = post("/evaluate/rows", request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bundle"]["spend_last_4h"], 9600.0);
    assert_eq!(body["bundle"]["daily_budget"], 5000.0);
    let rules: Vec<&str> = body["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["rule"].as_str().unwrap())
        .collect();
    assert_eq!(rules, vec!["A", "B"]);
    assert_eq!(body["live"]["spend"], 600.0);
}

#[tokio::test]
async fn empty_rows_are_unprocessable() {
    let (status, _) = post("/evaluate/rows", json!({ "rows": [] })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn scenarios_are_listed() {
    let (status, body) = get("/scenarios").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["normal", "zero-conversions", "pacing-breach", "cost-spike", "quality-drop"]
    );
}

#[tokio::test]
async fn seeded_scenario_trips_its_rule() {
    let (status, body) = get("/scenarios/quality-drop/evaluate?seed=7").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a["rule"] == "D"));
    assert!(body["live"].is_object());
}

#[tokio::test]
async fn unknown_scenario_is_not_found() {
    let (status, body) = get("/scenarios/meteor-strike/evaluate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("meteor-strike"));
}
