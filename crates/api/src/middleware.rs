use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use ironbank_auth::TokenService;

use crate::context::SessionContext;

/// Name of the HTTP-only cookie carrying the session token.
pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
}

/// Session gate for protected routes.
///
/// Extracts the session token from the cookie carrier and verifies it. All
/// failures (missing, malformed, forged, expired) take the same path: the
/// wrapped handler is never invoked and the caller is sent to the
/// unauthenticated path. On success the resolved identity is placed in
/// request-scoped context for this request only.
pub async fn session_gate(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let subject = extract_cookie(req.headers(), AUTH_COOKIE)
        .and_then(|token| state.tokens.verify(token).ok());

    let Some(subject) = subject else {
        return Redirect::to("/login").into_response();
    };

    req.extensions_mut().insert(SessionContext::new(subject));
    next.run(req).await
}

fn extract_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;

    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}
