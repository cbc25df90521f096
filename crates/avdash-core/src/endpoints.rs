//! Typed helpers over the documented Alpha Vantage functions the dashboard
//! uses. Each is a thin wrapper around [`AvClient::call`]; response structs
//! keep the upstream's literal field names.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::AvClient;
use crate::outcome::CallOutcome;
use crate::params::QueryParams;

/// Sort order accepted by `NEWS_SENTIMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsSort {
    Latest,
    Earliest,
}

impl NewsSort {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "LATEST",
            Self::Earliest => "EARLIEST",
        }
    }
}

/// Query for the `NEWS_SENTIMENT` endpoint. All fields optional; unset fields
/// never reach the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsQuery {
    pub tickers: Option<String>,
    pub topics: Option<String>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub sort: Option<NewsSort>,
    pub limit: Option<usize>,
}

impl NewsQuery {
    /// At least one of tickers/topics must narrow the query upstream.
    pub fn has_subject(&self) -> bool {
        self.tickers.is_some() || self.topics.is_some()
    }

    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .with("tickers", self.tickers.clone())
            .with("topics", self.topics.clone())
            .with("time_from", self.time_from.clone())
            .with("time_to", self.time_to.clone())
            .with("sort", self.sort.map(NewsSort::as_str))
            .with("limit", self.limit)
    }
}

/// `SYMBOL_SEARCH` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolSearchResponse {
    #[serde(rename = "bestMatches", default)]
    pub best_matches: Vec<SymbolMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolMatch {
    #[serde(rename = "1. symbol")]
    pub symbol: String,
    #[serde(rename = "2. name")]
    pub name: String,
    #[serde(rename = "3. type")]
    pub match_type: String,
    #[serde(rename = "4. region", default)]
    pub region: Option<String>,
    #[serde(rename = "8. currency", default)]
    pub currency: Option<String>,
    #[serde(rename = "9. matchScore", default)]
    pub match_score: Option<String>,
}

/// `GLOBAL_QUOTE` response. Alpha Vantage delivers every field as a string.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    pub quote: Option<GlobalQuote>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol", default)]
    pub symbol: String,
    #[serde(rename = "05. price", default)]
    pub price: String,
    #[serde(rename = "09. change", default)]
    pub change: Option<String>,
    #[serde(rename = "10. change percent", default)]
    pub change_percent: Option<String>,
}

impl AvClient {
    pub async fn overview(&self, symbol: &str) -> CallOutcome {
        self.call("OVERVIEW", QueryParams::new().with("symbol", symbol))
            .await
    }

    pub async fn global_quote(&self, symbol: &str) -> CallOutcome {
        self.call("GLOBAL_QUOTE", QueryParams::new().with("symbol", symbol))
            .await
    }

    pub async fn earnings(&self, symbol: &str) -> CallOutcome {
        self.call("EARNINGS", QueryParams::new().with("symbol", symbol))
            .await
    }

    /// Symbol/keyword search. A blank query resolves to an empty match list
    /// without touching the network.
    pub async fn symbol_search(&self, keywords: &str) -> CallOutcome {
        let keywords = keywords.trim();
        if keywords.is_empty() {
            return CallOutcome::success(200, json!({ "bestMatches": [] }));
        }

        self.call("SYMBOL_SEARCH", QueryParams::new().with("keywords", keywords))
            .await
    }

    /// News and sentiment feed. When the caller asked for a limit and the
    /// upstream returns a longer `feed`, the feed is truncated locally.
    pub async fn news_sentiment(&self, query: &NewsQuery) -> CallOutcome {
        let mut outcome = self.call("NEWS_SENTIMENT", query.to_params()).await;
        if let Some(limit) = query.limit.filter(|limit| *limit > 0) {
            truncate_feed(&mut outcome, limit);
        }
        outcome
    }
}

fn truncate_feed(outcome: &mut CallOutcome, limit: usize) {
    if !outcome.ok {
        return;
    }
    let Some(feed) = outcome
        .data
        .as_mut()
        .and_then(Value::as_object_mut)
        .and_then(|body| body.get_mut("feed"))
        .and_then(Value::as_array_mut)
    else {
        return;
    };
    feed.truncate(limit);
}
