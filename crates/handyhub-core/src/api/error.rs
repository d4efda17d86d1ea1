use reqwest::StatusCode;
use serde_json::Value;

use crate::error::Error;

/// Message used when an error response carries no message of its own
pub const GENERIC_API_ERROR: &str = "API Error";

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Truncate a response body to avoid logging excessive data
pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}

impl Error {
    /// Build an `Api` error from a non-success response body.
    /// Prefers the server's `error` field, then `message`.
    pub fn from_status(status: StatusCode, body: &Value) -> Self {
        let message = ["error", "message"]
            .iter()
            .find_map(|field| body.get(*field).and_then(Value::as_str))
            .filter(|message| !message.is_empty())
            .unwrap_or(GENERIC_API_ERROR)
            .to_string();

        Error::Api {
            status: Some(status.as_u16()),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_error_field_is_used() {
        let err = Error::from_status(
            StatusCode::UNAUTHORIZED,
            &json!({ "error": "Invalid credentials" }),
        );
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_message_field_is_second_choice() {
        let err = Error::from_status(StatusCode::BAD_REQUEST, &json!({ "message": "Email taken" }));
        assert_eq!(err.to_string(), "Email taken");
    }

    #[test]
    fn test_generic_message_when_body_has_none() {
        let err = Error::from_status(StatusCode::INTERNAL_SERVER_ERROR, &json!({ "ok": false }));
        assert_eq!(err.to_string(), GENERIC_API_ERROR);

        let err = Error::from_status(StatusCode::NOT_FOUND, &json!([1, 2]));
        assert_eq!(err.to_string(), GENERIC_API_ERROR);
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "é".repeat(400);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("(truncated, 800 total bytes)"));
    }
}
