use axum::http::StatusCode;
use serde::Deserialize;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequestBody {
    pub from: String,
    pub to: String,
    /// Raw JSON value so that non-integer amounts surface as `invalid_amount`
    /// rather than a framework deserialization error.
    pub amount: serde_json::Value,
}

/// Amounts must be JSON integers. Fractions, strings, and out-of-range
/// numbers are all the same client error.
pub fn parse_amount(value: &serde_json::Value) -> Result<i64, axum::response::Response> {
    value
        .as_i64()
        .ok_or_else(|| errors::json_error(StatusCode::BAD_REQUEST, "invalid_amount"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_amounts_parse() {
        assert_eq!(parse_amount(&json!(250)).unwrap(), 250);
        assert_eq!(parse_amount(&json!(-5)).unwrap(), -5);
    }

    #[test]
    fn non_integer_amounts_are_rejected() {
        assert!(parse_amount(&json!(10.5)).is_err());
        assert!(parse_amount(&json!("100")).is_err());
        assert!(parse_amount(&json!(null)).is_err());
        assert!(parse_amount(&json!(u64::MAX)).is_err());
    }
}
