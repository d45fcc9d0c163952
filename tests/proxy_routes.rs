//! Proxy routes against a fake frequency provider

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::Query,
    http::{Request, StatusCode, header},
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use tower::ServiceExt;
use wordle_butler::proxy::{ErrorBody, ProxyState, create_router};
use wordle_butler::trends::{ProxyTrendSource, WordKey, YearRange, fetch_trend_points};

/// Answers every term with `[1..=7]` and echoes the query it received
async fn fake_ngrams(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let content = params.get("content").cloned().unwrap_or_default();
    let series: Vec<Value> = content
        .split(',')
        .map(|term| {
            json!({
                "ngram": term,
                "timeseries": [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
                "query": params,
            })
        })
        .collect();
    Json(Value::Array(series))
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn fake_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/ngrams/json", get(fake_ngrams))
        .route(
            "/busy",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
        );
    spawn(app).await
}

fn proxy(upstream: String) -> Router {
    create_router(ProxyState::new(reqwest::Client::new(), upstream))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn missing_content_is_bad_request() {
    let app = proxy("http://127.0.0.1:9/ngrams/json".to_string());

    let (status, body) = get_json(app, "/ngram?year_start=2000").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: ErrorBody = serde_json::from_value(body).unwrap();
    assert_eq!(body.error, "Missing ?content=word1,word2");
}

#[tokio::test]
async fn empty_content_is_bad_request() {
    let app = proxy("http://127.0.0.1:9/ngrams/json".to_string());
    let (status, _) = get_json(app, "/ngram?content=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn defaults_are_filled_in() {
    let upstream = fake_upstream().await;
    let app = proxy(format!("http://{upstream}/ngrams/json"));

    let (status, body) = get_json(app, "/ngram?content=crane").await;

    assert_eq!(status, StatusCode::OK);
    let query = &body[0]["query"];
    assert_eq!(query["content"], "crane");
    assert_eq!(query["year_start"], "2019");
    assert_eq!(query["year_end"], "2025");
    assert_eq!(query["corpus"], "26");
    assert_eq!(query["smoothing"], "1");
    assert_eq!(query["case_insensitive"], "true");
}

#[tokio::test]
async fn given_params_are_forwarded_verbatim() {
    let upstream = fake_upstream().await;
    let app = proxy(format!("http://{upstream}/ngrams/json"));

    let (status, body) = get_json(
        app,
        "/ngram?content=crane,slate&year_start=1990&year_end=2000&corpus=en&smoothing=3&case_insensitive=false",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    let query = &body[1]["query"];
    assert_eq!(query["content"], "crane,slate");
    assert_eq!(query["year_start"], "1990");
    assert_eq!(query["year_end"], "2000");
    assert_eq!(query["corpus"], "en");
    assert_eq!(query["smoothing"], "3");
    assert_eq!(query["case_insensitive"], "false");
}

#[tokio::test]
async fn repeated_content_is_comma_joined() {
    let upstream = fake_upstream().await;
    let app = proxy(format!("http://{upstream}/ngrams/json"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/ngram?content=crane&content=slate")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["query"]["content"], "crane,slate");
}

#[tokio::test]
async fn repeated_params_without_content_are_rejected() {
    let app = proxy("http://127.0.0.1:9/ngrams/json".to_string());
    let (status, body) = get_json(app, "/ngram?corpus=26&corpus=en").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing ?content=word1,word2" }));
}

#[tokio::test]
async fn upstream_status_is_relayed() {
    let upstream = fake_upstream().await;
    let app = proxy(format!("http://{upstream}/busy"));

    let (status, body) = get_json(app, "/ngram?content=crane").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "error": "Failed with 503" }));
}

#[tokio::test]
async fn unreachable_upstream_is_internal_error() {
    // Grab a free port, then close it again
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);

    let app = proxy(format!("http://{closed}/ngrams/json"));
    let (status, body) = get_json(app, "/ngram?content=crane").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
}

#[tokio::test]
async fn responses_allow_any_origin() {
    let app = proxy("http://127.0.0.1:9/ngrams/json".to_string());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/ngram")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let app = proxy("http://127.0.0.1:9/ngrams/json".to_string());
    let (status, body) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn trend_source_round_trip_through_proxy() {
    let upstream = fake_upstream().await;
    let proxy_addr = spawn(proxy(format!("http://{upstream}/ngrams/json"))).await;
    let source = ProxyTrendSource::with_client(reqwest::Client::new(), format!("http://{proxy_addr}"));

    let points = fetch_trend_points(&source, &WordKey::new(&["crane"]), YearRange::default())
        .await
        .unwrap();

    assert_eq!(points.len(), 7);
    for (i, point) in points.iter().enumerate() {
        assert_eq!(point.year, 2019 + i as u16);
        assert_eq!(point.value("crane"), (i + 1) as f64);
    }
}
