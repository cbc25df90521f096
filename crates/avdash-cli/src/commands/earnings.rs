use avdash_core::{AvClient, CallOutcome};

use crate::cli::SymbolArgs;

pub async fn run(client: &AvClient, args: &SymbolArgs) -> CallOutcome {
    client.earnings(&args.symbol).await
}
