use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use ironbank_core::Email;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::middleware::AUTH_COOKIE;

/// The unauthenticated landing path the session gate redirects to.
pub async fn login_page() -> Response {
    errors::json_error(StatusCode::UNAUTHORIZED, "not_authenticated")
}

/// Authenticate and set the session cookie.
///
/// Unknown email and wrong password must stay indistinguishable to the caller.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> Response {
    let Ok(email) = body.email.parse::<Email>() else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "invalid_credentials");
    };

    let user = match services.credentials.verify_credentials(&email, &body.password).await {
        Ok(user) => user,
        Err(_) => return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    let Some(user) = user else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "invalid_credentials");
    };

    let token = match services.tokens.issue(&user.email) {
        Ok(token) => token,
        Err(_) => return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    let response = (
        StatusCode::OK,
        Json(serde_json::json!({
            "email": user.email.as_str(),
            "name": user.display_name,
        })),
    )
        .into_response();

    with_set_cookie(response, session_cookie(&token))
}

/// Clear the session cookie. The token itself stays valid until expiry
/// (stateless tokens, no revocation list); the client simply discards it.
pub async fn logout() -> Response {
    let response = (
        StatusCode::OK,
        Json(serde_json::json!({ "logged_out": true })),
    )
        .into_response();

    with_set_cookie(response, clear_cookie())
}

fn session_cookie(token: &str) -> String {
    format!("{AUTH_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax")
}

fn clear_cookie() -> String {
    format!("{AUTH_COOKIE}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax")
}

fn with_set_cookie(mut response: Response, cookie: String) -> Response {
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
            response
        }
        Err(_) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}
