//! Portfolio API Integration Tests
//!
//! Drives the router in-process for:
//! - Health check (GET /health)
//! - Validation (POST /api/portfolio/validate)
//! - History calculation (POST /api/portfolio/history)

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use portfolio_simulator::app::create_app;
use portfolio_simulator::services::portfolio_history_service::AggregationOptions;
use portfolio_simulator::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app() -> Router {
    create_app(AppState::default())
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn quote(ticker: &str, date: i64, adjusted_close: f64) -> Value {
    json!({
        "stock": ticker,
        "date": date,
        "open": adjusted_close,
        "high": adjusted_close,
        "low": adjusted_close,
        "close": adjusted_close,
        "volume": 1000.0,
        "adjustedClose": adjusted_close,
    })
}

fn variations(body: &Value) -> Vec<(i64, f64)> {
    body["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            (
                p["date"].as_i64().unwrap(),
                p["percentVariation"].as_f64().unwrap(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health_returns_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_validate_normalizes_tickers() {
    let body = json!([
        { "ticker": "petr4", "weight": 60.0 },
        { "ticker": "Vale3", "weight": 40.0 },
    ]);
    let (status, body) = post_json(app(), "/api/portfolio/validate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["positions"][0]["ticker"], "PETR4");
    assert_eq!(body["positions"][1]["ticker"], "VALE3");
    assert!((body["totalWeight"].as_f64().unwrap() - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_validate_reports_error_kind() {
    let cases = vec![
        (json!([]), "empty_portfolio"),
        (json!([{ "ticker": "", "weight": 100.0 }]), "empty_ticker"),
        (json!([{ "ticker": "AAA", "weight": 101.0 }]), "invalid_weight"),
        (
            json!([{ "ticker": "AAA", "weight": 50.0 }, { "ticker": "aaa", "weight": 50.0 }]),
            "duplicate_ticker",
        ),
        (json!([{ "ticker": "AAA", "weight": 90.0 }]), "weight_sum_mismatch"),
    ];

    for (payload, kind) in cases {
        let (status, body) = post_json(app(), "/api/portfolio/validate", payload).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "kind {}", kind);
        assert_eq!(body["kind"], kind);
        assert!(body["error"].as_str().is_some());
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/portfolio/validate")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// History calculation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_history_for_two_positions() {
    let payload = json!({
        "positions": [
            { "ticker": "aaa", "weight": 50.0 },
            { "ticker": "BBB", "weight": 50.0 },
        ],
        "histories": [
            [quote("BBB", 2, 50.0), quote("BBB", 3, 60.0)],
            [quote("AAA", 1, 100.0), quote("AAA", 2, 120.0)],
        ],
    });
    let (status, body) = post_json(app(), "/api/portfolio/history", payload).await;

    assert_eq!(status, StatusCode::OK);
    let points = variations(&body);
    assert_eq!(points.iter().map(|p| p.0).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!((points[0].1 - 0.0).abs() < 1e-9);
    assert!((points[1].1 - 10.0).abs() < 1e-9);
    assert!((points[2].1 - 10.0).abs() < 1e-9);

    assert_eq!(body["meta"]["points"], 3);
    assert_eq!(body["meta"]["start"], 1);
    assert_eq!(body["meta"]["end"], 3);
    assert_eq!(body["meta"]["skipped"], json!([]));
}

#[tokio::test]
async fn test_history_zero_dates_mean_unbounded() {
    let payload = json!({
        "positions": [{ "ticker": "AAA", "weight": 100.0 }],
        "histories": [[quote("AAA", 1, 100.0), quote("AAA", 2, 110.0), quote("AAA", 3, 90.0)]],
        "startDate": 0,
        "endDate": 0,
    });
    let (status, body) = post_json(app(), "/api/portfolio/history", payload).await;

    assert_eq!(status, StatusCode::OK);
    let points = variations(&body);
    assert_eq!(points.len(), 3);
    assert!((points[1].1 - 10.0).abs() < 1e-9);
    assert!((points[2].1 + 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_history_with_explicit_range() {
    let payload = json!({
        "positions": [{ "ticker": "AAA", "weight": 100.0 }],
        "histories": [[
            quote("AAA", 1, 50.0),
            quote("AAA", 2, 100.0),
            quote("AAA", 3, 125.0),
            quote("AAA", 4, 400.0),
        ]],
        "startDate": 2,
        "endDate": 3,
    });
    let (status, body) = post_json(app(), "/api/portfolio/history", payload).await;

    assert_eq!(status, StatusCode::OK);
    let points = variations(&body);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].0, 2);
    assert!((points[1].1 - 25.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_history_reports_missing_ticker_without_failing() {
    let payload = json!({
        "positions": [
            { "ticker": "AAA", "weight": 70.0 },
            { "ticker": "ZZZ", "weight": 30.0 },
        ],
        "histories": [[quote("AAA", 1, 10.0), quote("AAA", 2, 11.0)]],
    });
    let (status, body) = post_json(app(), "/api/portfolio/history", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(variations(&body).len(), 2);
    assert_eq!(
        body["meta"]["skipped"],
        json!([{ "ticker": "ZZZ", "reason": "no_matching_history" }])
    );
}

#[tokio::test]
async fn test_history_accepts_null_ohlcv_fields() {
    let payload = json!({
        "positions": [{ "ticker": "AAA", "weight": 100.0 }],
        "histories": [[
            { "stock": "AAA", "date": 1, "open": null, "high": null, "low": null,
              "close": null, "volume": null, "adjustedClose": 10.0 },
            quote("AAA", 2, 12.0),
        ]],
    });
    let (status, body) = post_json(app(), "/api/portfolio/history", payload).await;

    assert_eq!(status, StatusCode::OK);
    let points = variations(&body);
    assert_eq!(points.len(), 2);
    assert!((points[1].1 - 20.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_history_rejects_invalid_portfolio_before_aggregation() {
    let payload = json!({
        "positions": [{ "ticker": "AAA", "weight": 40.0 }],
        "histories": [[quote("AAA", 1, 10.0)]],
    });
    let (status, body) = post_json(app(), "/api/portfolio/history", payload).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "weight_sum_mismatch");
    assert_eq!(body["error"], "weights must sum to 100% (current: 40.00)");
}

#[tokio::test]
async fn test_history_rejects_inverted_range() {
    let payload = json!({
        "positions": [{ "ticker": "AAA", "weight": 100.0 }],
        "histories": [[quote("AAA", 1, 10.0)]],
        "startDate": 10,
        "endDate": 5,
    });
    let (status, body) = post_json(app(), "/api/portfolio/history", payload).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "invalid_date_range");
}

#[tokio::test]
async fn test_history_sorts_series_when_configured() {
    let app = create_app(AppState {
        aggregation: AggregationOptions { sort_by_date: true },
    });
    let payload = json!({
        "positions": [{ "ticker": "AAA", "weight": 100.0 }],
        "histories": [[quote("AAA", 3, 150.0), quote("AAA", 1, 100.0), quote("AAA", 2, 120.0)]],
    });
    let (status, body) = post_json(app, "/api/portfolio/history", payload).await;

    assert_eq!(status, StatusCode::OK);
    let points = variations(&body);
    assert_eq!(points.len(), 3);
    assert!((points[0].1 - 0.0).abs() < 1e-9);
    assert!((points[2].1 - 50.0).abs() < 1e-9);
}
