use avdash_core::{AvClient, CallOutcome};

use crate::cli::SymbolArgs;

pub async fn run(client: &AvClient, args: &SymbolArgs) -> CallOutcome {
    client.global_quote(&args.symbol).await
}
