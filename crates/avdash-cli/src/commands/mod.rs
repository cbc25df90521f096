mod call;
mod earnings;
mod key;
mod news;
mod overview;
mod quote;
mod search;

use std::sync::Arc;

use avdash_core::keystore::default_store_dir;
use avdash_core::{
    AvClient, CallOutcome, FileKeyStore, KeySource, KeyStore, MemoryKeyStore, StackedKeyStore,
    API_KEY_FILE, PERSISTENT_API_KEY_FILE,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Dispatches the parsed command. Key management has no call outcome; every
/// other command produces one.
pub async fn run(cli: &Cli) -> Result<Option<CallOutcome>, CliError> {
    if let Command::Key(args) = &cli.command {
        key::run(args)?;
        return Ok(None);
    }

    let client = build_client(cli);
    let outcome = match &cli.command {
        Command::Call(args) => call::run(&client, args).await?,
        Command::Overview(args) => overview::run(&client, args).await,
        Command::Quote(args) => quote::run(&client, args).await,
        Command::Earnings(args) => earnings::run(&client, args).await,
        Command::Search(args) => search::run(&client, args).await,
        Command::News(args) => news::run(&client, args).await?,
        Command::Key(_) => unreachable!("handled above"),
    };

    Ok(Some(outcome))
}

/// Key precedence: `--api-key` flag, then ALPHA_VANTAGE_API_KEY, then the
/// session key file, then the persistent (obfuscated) key file.
fn build_client(cli: &Cli) -> AvClient {
    let mut stores: Vec<Arc<dyn KeyStore>> = Vec::new();

    let explicit = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("ALPHA_VANTAGE_API_KEY").ok())
        .filter(|key| !key.is_empty());
    if let Some(key) = explicit {
        stores.push(Arc::new(MemoryKeyStore::with_key(key)));
    }

    if let Some(dir) = default_store_dir() {
        stores.push(Arc::new(FileKeyStore::plain(dir.join(API_KEY_FILE))));
        stores.push(Arc::new(FileKeyStore::obfuscated(
            dir.join(PERSISTENT_API_KEY_FILE),
        )));
    }

    AvClient::new(KeySource::Stored(Arc::new(StackedKeyStore::new(stores))))
        .with_base_url(cli.base_url.clone())
}
