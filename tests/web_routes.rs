//! Route behavior tests: required-parameter checks and outcome re-emission,
//! driven through the router with a stubbed transport.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use avdash_core::{
    AvClient, HttpClient, HttpError, HttpRequest, HttpResponse, KeySource,
};
use avdash_web::router;

#[derive(Debug)]
struct StubHttpClient {
    response: Result<HttpResponse, HttpError>,
}

impl HttpClient for StubHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let _ = request;
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

fn app_with(response: Result<HttpResponse, HttpError>) -> Router {
    let client = AvClient::new(KeySource::Configured(Some(String::from("TESTKEY"))))
        .with_base_url("https://example.test/query")
        .with_http_client(Arc::new(StubHttpClient { response }));
    router(client)
}

fn app_without_key() -> Router {
    let client = AvClient::new(KeySource::Configured(None))
        .with_base_url("https://example.test/query")
        .with_http_client(Arc::new(StubHttpClient {
            response: Ok(HttpResponse::ok_json("{}")),
        }));
    router(client)
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("router is infallible")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body reads")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

async fn text_body(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body reads")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}

#[tokio::test]
async fn av_passthrough_requires_function() {
    let app = app_with(Ok(HttpResponse::ok_json("{}")));
    let response = get(app, "/api/av?symbol=AAPL").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Missing required query param: function");
}

#[tokio::test]
async fn overview_requires_symbol() {
    let app = app_with(Ok(HttpResponse::ok_json("{}")));
    let response = get(app, "/api/overview").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Missing required query param: symbol");
}

#[tokio::test]
async fn overview_success_is_json_with_no_store() {
    let app = app_with(Ok(HttpResponse::ok_json(r#"{"Symbol":"AAPL"}"#)));
    let response = get(app, "/api/overview?symbol=AAPL").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("application/json"));

    let body = json_body(response).await;
    assert_eq!(body, json!({"Symbol": "AAPL"}));
}

#[tokio::test]
async fn upstream_note_is_reemitted_as_429_with_the_body() {
    let app = app_with(Ok(HttpResponse::ok_json(r#"{"Note":"Please try again"}"#)));
    let response = get(app, "/api/overview?symbol=AAPL").await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = json_body(response).await;
    assert_eq!(body, json!({"Note": "Please try again"}));
}

#[tokio::test]
async fn non_json_upstream_body_passes_through_as_text() {
    let app = app_with(Ok(HttpResponse::ok_json("plain text response")));
    let response = get(app, "/api/overview?symbol=AAPL").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(text_body(response).await, "plain text response");
}

#[tokio::test]
async fn news_sentiment_requires_tickers_or_topics() {
    let app = app_with(Ok(HttpResponse::ok_json("{}")));
    let response = get(app, "/api/news-sentiment?limit=10").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Provide at least one of: tickers or topics");
}

#[tokio::test]
async fn news_sentiment_truncates_the_feed_to_the_limit() {
    let app = app_with(Ok(HttpResponse::ok_json(
        r#"{"items":"3","feed":[{"title":"a"},{"title":"b"},{"title":"c"}]}"#,
    )));
    let response = get(app, "/api/news-sentiment?tickers=AAPL&limit=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["feed"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn missing_configured_key_yields_a_500_error_body() {
    let response = get(app_without_key(), "/api/overview?symbol=AAPL").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("misconfigured"));
}

#[tokio::test]
async fn transport_failure_yields_a_502_error_body() {
    let app = app_with(Err(HttpError::new("network fail")));
    let response = get(app, "/api/overview?symbol=AAPL").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("network fail"));
}

#[tokio::test]
async fn upstream_http_error_with_json_body_keeps_its_status() {
    let app = app_with(Ok(HttpResponse::with_status(503, r#"{"error":"down"}"#)));
    let response = get(app, "/api/overview?symbol=AAPL").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body, json!({"error": "down"}));
}
