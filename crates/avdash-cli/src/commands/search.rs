use avdash_core::{AvClient, CallOutcome};

use crate::cli::SearchArgs;

pub async fn run(client: &AvClient, args: &SearchArgs) -> CallOutcome {
    client.symbol_search(&args.keywords).await
}
