mod error;

use clap::Parser;

use avdash_core::{AvClient, KeySource, DEFAULT_BASE_URL};
use avdash_web::router;

use crate::error::ServeError;

/// Alpha Vantage proxy service.
///
/// Re-exposes classified upstream results over GET endpoints. The API key is
/// operator-supplied; requests made without one report a 500 until it is set.
#[derive(Debug, Parser)]
#[command(name = "avdash-web", version, about = "Alpha Vantage proxy service")]
struct ServeArgs {
    /// Socket address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Upstream query endpoint.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// API key; falls back to the ALPHA_VANTAGE_API_KEY environment variable.
    #[arg(long)]
    api_key: Option<String>,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), ServeError> {
    init_tracing();
    let args = ServeArgs::parse();

    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("ALPHA_VANTAGE_API_KEY").ok())
        .filter(|key| !key.is_empty());
    if api_key.is_none() {
        tracing::warn!("no API key configured; set ALPHA_VANTAGE_API_KEY or pass --api-key");
    }

    let client =
        AvClient::new(KeySource::Configured(api_key)).with_base_url(args.base_url.clone());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&args.bind).await?;
        tracing::info!(bind = %args.bind, upstream = %args.base_url, "listening");
        axum::serve(listener, router(client)).await
    })?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
