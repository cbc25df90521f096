//! CLI argument definitions for avdash.
//!
//! One subcommand per dashboard endpoint plus a generic `call` escape hatch
//! and `key` management for the stored API key.

use clap::{Args, Parser, Subcommand, ValueEnum};

use avdash_core::DEFAULT_BASE_URL;

/// Alpha Vantage terminal dashboard.
///
/// Fetch company overviews, quotes, earnings, symbol search, and news
/// sentiment with normalized error handling. The API key is resolved from
/// `--api-key`, the ALPHA_VANTAGE_API_KEY environment variable, or the
/// stored key (`avdash key set`), in that order.
#[derive(Debug, Parser)]
#[command(name = "avdash", version, about = "Alpha Vantage terminal dashboard")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Explicit API key, overriding the environment and the stored key.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Upstream query endpoint.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Key/value or columnar text for terminal display.
    Table,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Call any documented Alpha Vantage function with raw key=value params.
    ///
    /// # Examples
    ///
    ///   avdash call TIME_SERIES_DAILY symbol=AAPL outputsize=compact
    Call(CallArgs),

    /// Fetch the company overview for a symbol.
    Overview(SymbolArgs),

    /// Fetch the latest global quote for a symbol.
    Quote(SymbolArgs),

    /// Fetch the earnings history for a symbol.
    Earnings(SymbolArgs),

    /// Search for symbols by keyword.
    Search(SearchArgs),

    /// Fetch news and sentiment for tickers and/or topics.
    News(NewsArgs),

    /// Manage the stored API key.
    Key(KeyArgs),
}

/// Arguments for the generic `call` command.
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Alpha Vantage function name (e.g. OVERVIEW, TIME_SERIES_DAILY).
    pub function: String,

    /// Additional query parameters as key=value pairs.
    #[arg(num_args = 0..)]
    pub params: Vec<String>,
}

/// Arguments for single-symbol commands.
#[derive(Debug, Args)]
pub struct SymbolArgs {
    /// Market symbol (e.g. AAPL).
    pub symbol: String,
}

/// Arguments for the `search` command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-form search keywords (symbol or company name).
    pub keywords: String,
}

/// Arguments for the `news` command.
#[derive(Debug, Args)]
pub struct NewsArgs {
    /// Comma-separated ticker list (e.g. AAPL,MSFT).
    #[arg(long)]
    pub tickers: Option<String>,

    /// Comma-separated topic list (e.g. technology,earnings).
    #[arg(long)]
    pub topics: Option<String>,

    /// Earliest article time, YYYYMMDDTHHMM.
    #[arg(long)]
    pub time_from: Option<String>,

    /// Latest article time, YYYYMMDDTHHMM.
    #[arg(long)]
    pub time_to: Option<String>,

    /// Sort order.
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Maximum number of feed entries.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Latest,
    Earliest,
}

/// Arguments for the `key` command group.
#[derive(Debug, Args)]
pub struct KeyArgs {
    #[command(subcommand)]
    pub command: KeyCommand,
}

/// Stored-key management subcommands.
#[derive(Debug, Subcommand)]
pub enum KeyCommand {
    /// Store an API key for future calls.
    Set(KeySetArgs),

    /// Show where a key is stored, with a masked preview.
    Show,

    /// Remove any stored keys.
    Clear,
}

/// Arguments for `key set`.
#[derive(Debug, Args)]
pub struct KeySetArgs {
    /// The API key value.
    pub value: String,

    /// Store obfuscated in the persistent slot instead of the session slot.
    #[arg(long, default_value_t = false)]
    pub persistent: bool,
}
