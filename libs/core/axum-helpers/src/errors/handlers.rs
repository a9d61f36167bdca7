use axum::{Json, http::StatusCode, response::IntoResponse};

use super::{ErrorCode, ErrorResponse};

/// Fallback handler for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::with_message(
            ErrorCode::NotFound,
            "The requested resource was not found",
        )),
    )
}
