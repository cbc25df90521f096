//! HTTP routes re-exposing classified Alpha Vantage results.
//!
//! Each route runs one upstream call through the shared [`AvClient`] and
//! re-emits the classified outcome with the status the classifier produced:
//! non-JSON upstream bodies pass through as `text/plain`, failures become JSON
//! error bodies, successes are JSON with `cache-control: no-store`.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use avdash_core::{AvClient, CallOutcome, NewsQuery, NewsSort, QueryParams};

type SharedClient = Arc<AvClient>;

/// Builds the API router around one shared caller.
pub fn router(client: AvClient) -> Router {
    Router::new()
        .route("/api/av", get(av_passthrough))
        .route("/api/overview", get(overview))
        .route("/api/earnings-history", get(earnings_history))
        .route("/api/news-sentiment", get(news_sentiment))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(client))
}

/// Generic pass-through: `function` is required, every other query parameter
/// is forwarded verbatim.
async fn av_passthrough(
    State(client): State<SharedClient>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let function = query
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("function"))
        .map(|(_, value)| value.clone());
    let Some(function) = function.filter(|f| !f.is_empty()) else {
        return missing_param("function");
    };

    let params: QueryParams = query
        .into_iter()
        .filter(|(key, _)| !key.eq_ignore_ascii_case("function"))
        .collect();

    render_outcome(client.call(&function, params).await)
}

#[derive(Debug, Deserialize)]
struct SymbolParams {
    symbol: Option<String>,
}

async fn overview(
    State(client): State<SharedClient>,
    Query(params): Query<SymbolParams>,
) -> Response {
    let Some(symbol) = params.symbol.filter(|s| !s.is_empty()) else {
        return missing_param("symbol");
    };
    render_outcome(client.overview(&symbol).await)
}

async fn earnings_history(
    State(client): State<SharedClient>,
    Query(params): Query<SymbolParams>,
) -> Response {
    let Some(symbol) = params.symbol.filter(|s| !s.is_empty()) else {
        return missing_param("symbol");
    };
    render_outcome(client.earnings(&symbol).await)
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    tickers: Option<String>,
    topics: Option<String>,
    time_from: Option<String>,
    time_to: Option<String>,
    sort: Option<String>,
    limit: Option<usize>,
}

async fn news_sentiment(
    State(client): State<SharedClient>,
    Query(params): Query<NewsParams>,
) -> Response {
    if params.tickers.is_none() && params.topics.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Provide at least one of: tickers or topics" })),
        )
            .into_response();
    }

    let query = NewsQuery {
        tickers: params.tickers,
        topics: params.topics,
        time_from: params.time_from,
        time_to: params.time_to,
        sort: params.sort.as_deref().and_then(parse_sort),
        limit: params.limit,
    };

    render_outcome(client.news_sentiment(&query).await)
}

fn parse_sort(raw: &str) -> Option<NewsSort> {
    if raw.eq_ignore_ascii_case("LATEST") {
        Some(NewsSort::Latest)
    } else if raw.eq_ignore_ascii_case("EARLIEST") {
        Some(NewsSort::Earliest)
    } else {
        None
    }
}

fn missing_param(name: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": format!("Missing required query param: {name}") })),
    )
        .into_response()
}

/// Maps a classified outcome onto an HTTP response, mirroring the outcome's
/// status. A status of 0 (a request that never completed in the stored-key
/// variant) has no HTTP form and is re-emitted as a 502.
fn render_outcome(outcome: CallOutcome) -> Response {
    let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::BAD_GATEWAY);

    // Non-JSON upstream body: plain text, no reinterpretation.
    if let (Some(text), None) = (&outcome.text, &outcome.data) {
        return (status, text.clone()).into_response();
    }

    if !outcome.ok {
        let body = outcome.data.clone().unwrap_or_else(|| {
            let mut fields = serde_json::Map::new();
            fields.insert(
                String::from("error"),
                json!(outcome
                    .error
                    .clone()
                    .unwrap_or_else(|| String::from("Alpha Vantage request failed"))),
            );
            if let Some(note) = &outcome.upstream_note {
                fields.insert(String::from("details"), json!(note));
            }
            Value::Object(fields)
        });
        return (status, Json(body)).into_response();
    }

    (
        status,
        [(header::CACHE_CONTROL, "no-store")],
        Json(outcome.data.unwrap_or_else(|| json!({}))),
    )
        .into_response()
}
