use avdash_core::{AvClient, CallOutcome, QueryParams};

use crate::cli::CallArgs;
use crate::error::CliError;

pub async fn run(client: &AvClient, args: &CallArgs) -> Result<CallOutcome, CliError> {
    let params = parse_params(&args.params)?;
    Ok(client.call(&args.function, params).await)
}

fn parse_params(raw: &[String]) -> Result<QueryParams, CliError> {
    let mut params = QueryParams::new();
    for entry in raw {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(CliError::Command(format!(
                "invalid parameter '{entry}', expected key=value"
            )));
        };
        if key.is_empty() {
            return Err(CliError::Command(format!(
                "invalid parameter '{entry}', key must not be empty"
            )));
        }
        params.set(key, value);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_pairs_are_parsed_in_order() {
        let params = parse_params(&[
            String::from("symbol=AAPL"),
            String::from("outputsize=compact"),
        ])
        .expect("valid params");

        assert_eq!(params.value_of("symbol").as_deref(), Some("AAPL"));
        assert_eq!(params.value_of("outputsize").as_deref(), Some("compact"));
    }

    #[test]
    fn values_may_contain_equals_signs() {
        let params = parse_params(&[String::from("time_from=20240101T0000=x")])
            .expect("valid params");
        assert_eq!(
            params.value_of("time_from").as_deref(),
            Some("20240101T0000=x")
        );
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert!(parse_params(&[String::from("symbol")]).is_err());
        assert!(parse_params(&[String::from("=AAPL")]).is_err());
    }
}
