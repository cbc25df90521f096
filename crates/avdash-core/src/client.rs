use std::sync::Arc;

use crate::error::MissingKeyError;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::keystore::KeyStore;
use crate::outcome::{classify_response, CallOutcome};
use crate::params::{build_url, QueryParams};

/// Default upstream query endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Key-resolution strategy: the single axis on which the caller variants
/// differ.
///
/// `Stored` is the interactive variant (key supplied by the user, kept in a
/// [`KeyStore`]): a missing key is the caller's fault (400) and a request that
/// never completes reports status 0. `Configured` is the server variant
/// (operator-supplied key): absence is a misconfiguration (500) and transport
/// failure maps to a 502.
#[derive(Clone)]
pub enum KeySource {
    Stored(Arc<dyn KeyStore>),
    Configured(Option<String>),
}

impl KeySource {
    /// Resolves the key for one call: an explicit `apikey` parameter wins,
    /// then the strategy's fallback, then a definite miss.
    pub fn resolve(&self, explicit: Option<&str>) -> Result<String, MissingKeyError> {
        if let Some(key) = explicit.filter(|key| !key.is_empty()) {
            return Ok(key.to_owned());
        }

        match self {
            Self::Stored(store) => store
                .get()
                .filter(|key| !key.is_empty())
                .ok_or(MissingKeyError::NoStoredKey),
            Self::Configured(value) => value
                .clone()
                .filter(|key| !key.is_empty())
                .ok_or(MissingKeyError::NotConfigured),
        }
    }

    /// Status reported when the request never completes.
    pub const fn network_failure_status(&self) -> u16 {
        match self {
            Self::Stored(_) => 0,
            Self::Configured(_) => 502,
        }
    }
}

/// Alpha Vantage caller.
///
/// One outbound GET per invocation, no retries, no shared state between calls.
/// Every path returns a [`CallOutcome`]; the method itself never fails.
#[derive(Clone)]
pub struct AvClient {
    base_url: String,
    key_source: KeySource,
    http: Arc<dyn HttpClient>,
}

impl AvClient {
    pub fn new(key_source: KeySource) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            key_source,
            http: Arc::new(ReqwestHttpClient::new()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls an Alpha Vantage function: resolve key, build URL, fetch, parse,
    /// classify.
    ///
    /// With no resolvable key the call short-circuits before any network
    /// activity. A caller-supplied `apikey` parameter overrides the resolved
    /// key in the final URL.
    pub async fn call(&self, function: &str, params: QueryParams) -> CallOutcome {
        let explicit = params.value_of("apikey");
        let api_key = match self.key_source.resolve(explicit.as_deref()) {
            Ok(key) => key,
            Err(missing) => {
                tracing::debug!(function, %missing, "short-circuiting call");
                return CallOutcome::missing_key(missing);
            }
        };

        let mut merged = QueryParams::new()
            .with("function", function)
            .with("apikey", api_key);
        merged.merge(params);
        let url = build_url(&self.base_url, &merged);

        tracing::debug!(function, "requesting upstream");
        let response = match self.http.execute(HttpRequest::get(url)).await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(function, %error, "transport failure");
                return CallOutcome::transport_failure(
                    self.key_source.network_failure_status(),
                    error.message(),
                );
            }
        };

        let outcome = classify_response(&response);
        tracing::debug!(function, status = outcome.status, ok = outcome.ok, "classified");
        outcome
    }
}
