//! Display formatting for fundamental-data fields, keyed by the upstream's
//! camelCase field names. Mirrors what the dashboard showed: currency fields
//! as USD, percent-like fields auto-scaled, everything else comma-grouped.

use serde_json::Value;

/// Fields formatted as USD currency.
const CURRENCY_KEYS: &[&str] = &[
    "totalRevenue",
    "grossProfit",
    "operatingIncome",
    "netIncome",
    "ebit",
    "ebitda",
    "totalAssets",
    "totalLiabilities",
    "totalShareholderEquity",
    "cashAndCashEquivalentsAtCarryingValue",
    "commonStock",
    "retainedEarnings",
    "longTermDebt",
    "shortTermDebt",
    "researchAndDevelopment",
    "operatingExpenses",
    "costOfRevenueForJcr",
    "operatingCashflow",
    "capitalExpenditures",
    "cashflowFromInvestment",
    "cashflowFromFinancing",
    "dividendPayout",
    "dividendPayoutCommonStock",
    "dividendPayoutPreferredStock",
    "changeInCashAndCashEquivalents",
    "profitLoss",
    "depreciationDepletionAndAmortization",
    "changeInOperatingAssets",
    "changeInOperatingLiabilities",
    "changeInInventory",
    "changeInAccountsReceivable",
    "changeInAccountsPayable",
    "proceedsFromIssuanceOfLongTermDebtAndCapitalSecuritiesNet",
    "debtRepayment",
    "paymentsForRepurchaseOfCommonStock",
    "paymentsForRepurchaseOfEquity",
    "paymentsForRepurchaseOfPreferredStock",
    "commonStockIssuance",
    "commonStockRepurchased",
    "interestPaid",
];

/// Fields that carry percentages; ratio-valued inputs are scaled to percent.
const PERCENT_KEYS: &[&str] = &[
    "dividendYield",
    "profitMargin",
    "operatingMargin",
    "grossMargin",
    "returnOnAssets",
    "returnOnEquity",
    "returnOnInvestedCapital",
    "payoutRatio",
    "quarterlyRevenueGrowthYOY",
    "quarterlyEarningsGrowthYOY",
];

/// Fields that are never numeric and pass through untouched.
const NON_NUMERIC_KEYS: &[&str] = &["fiscalDateEnding", "reportedCurrency", "symbol"];

/// Formats a field value for display based on its key.
///
/// Null, empty, and the upstream's literal `"None"` all render as `N/A`.
/// Values that fail to parse as numbers pass through unchanged.
pub fn format_value(key: &str, value: &Value) -> String {
    let raw = match value {
        Value::Null => return String::from("N/A"),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    };

    if raw.is_empty() || raw == "None" {
        return String::from("N/A");
    }

    if NON_NUMERIC_KEYS.contains(&key) {
        return raw;
    }

    let Ok(num) = raw.trim().parse::<f64>() else {
        return raw;
    };

    if CURRENCY_KEYS.contains(&key) {
        return format_currency(num);
    }

    if PERCENT_KEYS.contains(&key) || looks_percent_like(key) {
        return format_percent(num);
    }

    format_grouped(num, 3, 0)
}

fn looks_percent_like(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    ["percent", "margin", "yield", "ratio"]
        .iter()
        .any(|marker| key.contains(marker))
}

fn format_currency(num: f64) -> String {
    let formatted = format_grouped(num.abs(), 2, 2);
    if num < 0.0 {
        format!("-${formatted}")
    } else {
        format!("${formatted}")
    }
}

/// Ratio magnitudes (|v| <= 1) are treated as fractions and scaled to percent.
fn format_percent(num: f64) -> String {
    let value = if num.abs() <= 1.0 { num * 100.0 } else { num };
    format!("{}%", format_grouped(value, 2, 0))
}

/// `en-US`-style rendering: thousands-grouped integer part, fraction rounded
/// to `max_frac` digits with trailing zeros trimmed down to `min_frac`.
fn format_grouped(num: f64, max_frac: usize, min_frac: usize) -> String {
    let negative = num < 0.0;
    let rounded = format!("{:.*}", max_frac, num.abs());
    let (int_part, frac_part) = rounded
        .split_once('.')
        .unwrap_or((rounded.as_str(), ""));

    let mut frac = frac_part.trim_end_matches('0').to_owned();
    while frac.len() < min_frac {
        frac.push('0');
    }

    let mut out = String::new();
    // a value that rounded away to zero loses its sign
    if negative && !(int_part == "0" && frac.trim_end_matches('0').is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (index + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nullish_and_empty_like_values_render_as_na() {
        assert_eq!(format_value("any", &Value::Null), "N/A");
        assert_eq!(format_value("any", &json!("")), "N/A");
        assert_eq!(format_value("any", &json!("None")), "N/A");
    }

    #[test]
    fn non_numeric_keys_pass_through_unmodified() {
        assert_eq!(format_value("symbol", &json!("AAPL")), "AAPL");
        assert_eq!(format_value("reportedCurrency", &json!("USD")), "USD");
        assert_eq!(
            format_value("fiscalDateEnding", &json!("2024-09-30")),
            "2024-09-30"
        );
    }

    #[test]
    fn currency_keys_format_as_usd() {
        assert_eq!(format_value("totalRevenue", &json!(1_234_567)), "$1,234,567.00");
        assert_eq!(format_value("netIncome", &json!("2500")), "$2,500.00");
        assert_eq!(format_value("profitLoss", &json!(-1234.5)), "-$1,234.50");
    }

    #[test]
    fn percent_keys_auto_scale_ratios() {
        assert_eq!(format_value("profitMargin", &json!(12.3456)), "12.35%");
        assert_eq!(format_value("profitMargin", &json!(0.123456)), "12.35%");
        assert_eq!(format_value("dividendYield", &json!("0.0044")), "0.44%");
    }

    #[test]
    fn percent_like_key_names_are_detected() {
        assert_eq!(format_value("pegRatio", &json!(2.5)), "2.5%");
        assert_eq!(format_value("someMarginField", &json!(0.2)), "20%");
    }

    #[test]
    fn generic_numbers_get_comma_grouping() {
        assert_eq!(format_value("sharesOutstanding", &json!(1_234_567)), "1,234,567");
        assert_eq!(format_value("someNumber", &json!("9876543")), "9,876,543");
        assert_eq!(format_value("someNumber", &json!(999)), "999");
    }

    #[test]
    fn non_numeric_unknown_values_pass_through() {
        assert_eq!(format_value("unknown", &json!("abc123")), "abc123");
    }
}
