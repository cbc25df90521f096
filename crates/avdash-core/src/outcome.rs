use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MissingKeyError;
use crate::http_client::HttpResponse;

/// Body fields Alpha Vantage uses for "soft errors": responses delivered with
/// a success status but carrying a rate-limit or error message. Checked in
/// this priority order.
const SOFT_ERROR_FIELDS: [&str; 3] = ["Note", "Information", "Error Message"];

/// Classified result of one Alpha Vantage call.
///
/// Exactly one of `data`, `text`, `error` is populated, except the soft-error
/// case which carries both `data` and `upstream_note`. Every call path
/// produces one of these; no error type crosses the caller's boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOutcome {
    pub ok: bool,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallOutcome {
    fn empty(ok: bool, status: u16) -> Self {
        Self {
            ok,
            status,
            data: None,
            text: None,
            upstream_note: None,
            error: None,
        }
    }

    /// Short-circuit outcome for a call that never resolved a key.
    pub fn missing_key(error: MissingKeyError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::empty(false, error.status())
        }
    }

    /// Outcome for a request that never completed.
    pub fn transport_failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::empty(false, status)
        }
    }

    /// Outcome for a completed exchange whose body was not JSON.
    pub fn non_json(ok: bool, status: u16, body: impl Into<String>) -> Self {
        Self {
            text: Some(body.into()),
            ..Self::empty(ok, status)
        }
    }

    /// Outcome for an upstream soft error: the transport said success but the
    /// body carried a rate-limit or error note.
    pub fn soft_error(note: impl Into<String>, data: Value) -> Self {
        Self {
            data: Some(data),
            upstream_note: Some(note.into()),
            ..Self::empty(false, 429)
        }
    }

    /// Plain JSON outcome carrying the transport's own status.
    pub fn json(ok: bool, status: u16, data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::empty(ok, status)
        }
    }

    /// Successful JSON outcome with an explicit status.
    pub fn success(status: u16, data: Value) -> Self {
        Self::json(true, status, data)
    }

    /// Typed view over `data`, `None` when absent or mismatched.
    pub fn decode<T>(&self) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.data
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

/// Classifies a completed upstream exchange.
///
/// Non-JSON bodies pass through untouched with the transport status. JSON
/// bodies are inspected for soft-error fields; a hit remaps the whole call to
/// a 429 regardless of the transport's verdict. Plain JSON keeps the transport
/// status verbatim, including non-200 success codes.
pub fn classify_response(response: &HttpResponse) -> CallOutcome {
    let ok = response.is_success();

    let parsed: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(_) => return CallOutcome::non_json(ok, response.status, response.body.clone()),
    };

    if let Some(note) = soft_error_note(&parsed) {
        return CallOutcome::soft_error(note, parsed);
    }

    CallOutcome::json(ok, response.status, parsed)
}

/// First non-empty soft-error string in field priority order.
fn soft_error_note(value: &Value) -> Option<String> {
    SOFT_ERROR_FIELDS.iter().find_map(|field| {
        value
            .get(field)
            .and_then(Value::as_str)
            .filter(|note| !note.is_empty())
            .map(str::to_owned)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn note_at_transport_200_becomes_a_rate_limit_outcome() {
        let response = HttpResponse::ok_json(r#"{"Note":"Please try again"}"#);
        let outcome = classify_response(&response);

        assert!(!outcome.ok);
        assert_eq!(outcome.status, 429);
        assert_eq!(outcome.upstream_note.as_deref(), Some("Please try again"));
        assert_eq!(outcome.data, Some(json!({"Note": "Please try again"})));
        assert_eq!(outcome.text, None);
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn soft_error_fields_are_checked_in_priority_order() {
        let response = HttpResponse::ok_json(
            r#"{"Information":"second","Note":"first","Error Message":"third"}"#,
        );
        let outcome = classify_response(&response);
        assert_eq!(outcome.upstream_note.as_deref(), Some("first"));

        let response =
            HttpResponse::ok_json(r#"{"Error Message":"third","Information":"second"}"#);
        let outcome = classify_response(&response);
        assert_eq!(outcome.upstream_note.as_deref(), Some("second"));

        let response = HttpResponse::ok_json(r#"{"Error Message":"third"}"#);
        let outcome = classify_response(&response);
        assert_eq!(outcome.upstream_note.as_deref(), Some("third"));
    }

    #[test]
    fn empty_or_non_string_soft_error_fields_are_ignored() {
        let response = HttpResponse::ok_json(r#"{"Note":"","Information":42}"#);
        let outcome = classify_response(&response);

        assert!(outcome.ok);
        assert_eq!(outcome.status, 200);
        assert_eq!(outcome.upstream_note, None);
    }

    #[test]
    fn non_json_body_passes_through_as_text() {
        let response = HttpResponse::ok_json("plain text response");
        let outcome = classify_response(&response);

        assert!(outcome.ok);
        assert_eq!(outcome.status, 200);
        assert_eq!(outcome.text.as_deref(), Some("plain text response"));
        assert_eq!(outcome.data, None);
    }

    #[test]
    fn http_error_with_json_body_keeps_the_transport_status() {
        let response = HttpResponse::with_status(503, r#"{"error":"down"}"#);
        let outcome = classify_response(&response);

        assert!(!outcome.ok);
        assert_eq!(outcome.status, 503);
        assert_eq!(outcome.data, Some(json!({"error": "down"})));
        assert_eq!(outcome.upstream_note, None);
    }

    #[test]
    fn non_200_success_status_is_preserved() {
        let response = HttpResponse::with_status(206, r#"{"partial":true}"#);
        let outcome = classify_response(&response);

        assert!(outcome.ok);
        assert_eq!(outcome.status, 206);
        assert_eq!(outcome.data, Some(json!({"partial": true})));
    }

    #[test]
    fn serialization_uses_the_original_wire_names() {
        let outcome = CallOutcome::soft_error("limit hit", json!({"Note": "limit hit"}));
        let wire = serde_json::to_value(&outcome).expect("outcome serializes");

        assert_eq!(wire["upstreamNote"], "limit hit");
        assert_eq!(wire["ok"], false);
        assert_eq!(wire["status"], 429);
        assert!(wire.get("text").is_none());
        assert!(wire.get("error").is_none());
    }

    #[test]
    fn decode_reads_typed_data() {
        #[derive(serde::Deserialize)]
        struct Body {
            error: String,
        }

        let outcome = CallOutcome::json(false, 503, json!({"error": "down"}));
        let body: Body = outcome.decode().expect("decodes");
        assert_eq!(body.error, "down");

        let outcome = CallOutcome::non_json(true, 200, "nope");
        assert!(outcome.decode::<Body>().is_none());
    }
}
