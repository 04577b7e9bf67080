use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ironbank_transfer::TransferError;

/// Terse JSON error body: a reason code and nothing else.
///
/// No messages, no internals. Several distinct failures deliberately share a
/// code (see the transfer taxonomy) so callers cannot probe for what exists.
pub fn json_error(status: StatusCode, code: &'static str) -> axum::response::Response {
    (status, axum::Json(json!({ "error": code }))).into_response()
}

pub fn transfer_error_to_response(err: TransferError) -> axum::response::Response {
    match err {
        TransferError::InvalidAmount => json_error(StatusCode::BAD_REQUEST, "invalid_amount"),
        TransferError::Unauthorized => json_error(StatusCode::NOT_FOUND, "unauthorized"),
        TransferError::InsufficientFunds => {
            json_error(StatusCode::BAD_REQUEST, "insufficient_funds")
        }
        TransferError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found"),
        TransferError::Failure => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "transaction_failure")
        }
    }
}
