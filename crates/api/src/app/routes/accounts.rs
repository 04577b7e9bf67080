use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use ironbank_core::AccountId;

use crate::app::errors;
use crate::app::services::AppServices;

/// Balance view, masked by ownership: an account that does not exist and an
/// account owned by someone else produce the same `not_found`.
pub async fn get_balance(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<crate::context::SessionContext>,
    Path(id): Path<String>,
) -> Response {
    let Ok(account) = id.parse::<AccountId>() else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found");
    };

    match services.store.balance_for_owner(&account, session.subject()).await {
        Ok(Some(balance)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "account_id": account.as_str(),
                "balance": balance,
            })),
        )
            .into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found"),
        Err(_) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}
