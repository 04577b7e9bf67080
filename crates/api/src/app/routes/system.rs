use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    Extension(session): Extension<crate::context::SessionContext>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "email": session.subject().as_str(),
    }))
}
