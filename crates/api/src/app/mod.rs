//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: infrastructure wiring (bank store, credential service, transfer engine)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent, deliberately terse error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get, routing::post};

use ironbank_auth::TokenService;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(auth_secret: String) -> Router {
    let tokens = Arc::new(TokenService::with_default_validity(auth_secret.as_bytes()));
    let auth_state = middleware::AuthState {
        tokens: tokens.clone(),
    };

    let services = Arc::new(services::build_services(tokens).await);

    // Protected routes: no handler runs without a resolved identity.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::session_gate,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route("/logout", post(routes::auth::logout))
        .merge(protected)
        .layer(Extension(services))
}
