//! Core contracts for avdash.
//!
//! This crate contains:
//! - Query parameter handling and URL building
//! - The HTTP transport seam and reqwest-backed client
//! - The Alpha Vantage caller and response classifier
//! - Key resolution strategies and key storage
//! - Typed endpoint helpers and display formatting

pub mod client;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod http_client;
pub mod keystore;
pub mod outcome;
pub mod params;

pub use client::{AvClient, KeySource, DEFAULT_BASE_URL};
pub use endpoints::{GlobalQuote, GlobalQuoteResponse, NewsQuery, NewsSort, SymbolMatch,
    SymbolSearchResponse};
pub use error::MissingKeyError;
pub use format::format_value;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient};
pub use keystore::{FileKeyStore, KeyStore, MemoryKeyStore, StackedKeyStore, API_KEY_FILE,
    PERSISTENT_API_KEY_FILE};
pub use outcome::CallOutcome;
pub use params::{build_url, ParamValue, QueryParams};
