use avdash_core::{AvClient, CallOutcome, NewsQuery, NewsSort};

use crate::cli::{NewsArgs, SortArg};
use crate::error::CliError;

pub async fn run(client: &AvClient, args: &NewsArgs) -> Result<CallOutcome, CliError> {
    if args.tickers.is_none() && args.topics.is_none() {
        return Err(CliError::Command(String::from(
            "provide at least one of --tickers or --topics",
        )));
    }

    let query = NewsQuery {
        tickers: args.tickers.clone(),
        topics: args.topics.clone(),
        time_from: args.time_from.clone(),
        time_to: args.time_to.clone(),
        sort: args.sort.map(to_sort),
        limit: args.limit,
    };

    Ok(client.news_sentiment(&query).await)
}

const fn to_sort(arg: SortArg) -> NewsSort {
    match arg {
        SortArg::Latest => NewsSort::Latest,
        SortArg::Earliest => NewsSort::Earliest,
    }
}
