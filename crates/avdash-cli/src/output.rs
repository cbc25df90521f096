use avdash_core::{format_value, CallOutcome, GlobalQuoteResponse, SymbolSearchResponse};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(outcome: &CallOutcome, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(outcome)?
            } else {
                serde_json::to_string(outcome)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(outcome)?,
    }

    Ok(())
}

fn render_table(outcome: &CallOutcome) -> Result<(), CliError> {
    println!(
        "status: {} ({})",
        outcome.status,
        if outcome.ok { "ok" } else { "failed" }
    );
    if let Some(note) = &outcome.upstream_note {
        println!("upstream note: {note}");
    }
    if let Some(error) = &outcome.error {
        println!("error: {error}");
    }
    if let Some(text) = &outcome.text {
        println!("{text}");
        return Ok(());
    }

    let Some(data) = &outcome.data else {
        return Ok(());
    };

    if data.get("bestMatches").is_some() {
        if let Some(search) = outcome.decode::<SymbolSearchResponse>() {
            render_matches(&search);
            return Ok(());
        }
    }

    if data.get("Global Quote").is_some() {
        if let Some(quote) = outcome.decode::<GlobalQuoteResponse>() {
            render_quote(&quote);
            return Ok(());
        }
    }

    if let Some(feed) = data.get("feed").and_then(Value::as_array) {
        render_feed(feed);
        return Ok(());
    }

    if let Some(map) = data.as_object() {
        for row in object_rows(map) {
            println!("{row}");
        }
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn render_matches(search: &SymbolSearchResponse) {
    if search.best_matches.is_empty() {
        println!("no matches");
        return;
    }
    for entry in &search.best_matches {
        println!(
            "{:<10} {:<10} {:<16} {}",
            entry.symbol,
            entry.match_type,
            entry.region.as_deref().unwrap_or("-"),
            entry.name
        );
    }
}

fn render_quote(response: &GlobalQuoteResponse) {
    let Some(quote) = &response.quote else {
        println!("no quote data");
        return;
    };
    println!("symbol: {}", quote.symbol);
    println!("price : {}", quote.price);
    if let Some(change) = &quote.change {
        println!("change: {}", change);
    }
    if let Some(percent) = &quote.change_percent {
        println!("change%: {}", percent);
    }
}

fn render_feed(feed: &[Value]) {
    if feed.is_empty() {
        println!("no articles");
        return;
    }
    for entry in feed {
        let title = entry
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("(untitled)");
        match entry.get("source").and_then(Value::as_str) {
            Some(source) => println!("- {title} [{source}]"),
            None => println!("- {title}"),
        }
    }
}

/// Aligned key/value rows for a flat object, values run through the display
/// formatter. Nested values fall back to compact JSON.
fn object_rows(map: &serde_json::Map<String, Value>) -> Vec<String> {
    let width = map.keys().map(String::len).max().unwrap_or(0);
    map.iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::Array(_) | Value::Object(_) => value.to_string(),
                scalar => format_value(key, scalar),
            };
            format!("{key:<width$}  {rendered}")
        })
        .collect()
}
