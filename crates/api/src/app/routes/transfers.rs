use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use ironbank_core::AccountId;
use ironbank_transfer::{TransferRequest, validate_amount};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Execute a fund transfer on behalf of the authenticated subject.
///
/// Precondition order is load-bearing: amount shape and ceiling are settled
/// before account ids resolve against the store, and a bad source reads the
/// same whether it is missing or simply not the requester's.
pub async fn create_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<crate::context::SessionContext>,
    Json(body): Json<dto::TransferRequestBody>,
) -> Response {
    let amount = match dto::parse_amount(&body.amount) {
        Ok(amount) => amount,
        Err(response) => return response,
    };
    if let Err(err) = validate_amount(amount, &services.policy) {
        return errors::transfer_error_to_response(err);
    }

    let Ok(source) = body.from.parse::<AccountId>() else {
        return errors::json_error(StatusCode::NOT_FOUND, "unauthorized");
    };
    let Ok(target) = body.to.parse::<AccountId>() else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found");
    };

    let request = TransferRequest {
        source,
        target,
        amount,
    };

    match services.engine.transfer(&request, session.subject()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "from": request.source.as_str(),
                "to": request.target.as_str(),
                "amount": request.amount,
            })),
        )
            .into_response(),
        Err(err) => errors::transfer_error_to_response(err),
    }
}
