use axum::{
    Router,
    routing::{get, post},
};

pub mod accounts;
pub mod auth;
pub mod system;
pub mod transfers;

/// Router for all authenticated endpoints (behind the session gate).
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/accounts/:id/balance", get(accounts::get_balance))
        .route("/transfers", post(transfers::create_transfer))
}
