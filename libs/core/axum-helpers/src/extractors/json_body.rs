//! JSON extractor that rejects malformed or incomplete bodies with 400.

use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    extract::{FromRequest, Json, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Builds the 400 response for a failed JSON extraction.
///
/// Axum's own rejection answers 422 for a body that parses but does not
/// match the target type (a missing required field, a wrong type). Bad
/// client input is a 400 here regardless of which way the body is broken.
pub(crate) fn json_rejection_response(rejection: JsonRejection) -> Response {
    tracing::info!(
        error_code = ErrorCode::InvalidJson.code(),
        "JSON extraction rejected: {:?}",
        rejection
    );

    let error_response = ErrorResponse {
        code: ErrorCode::InvalidJson.code(),
        error: ErrorCode::InvalidJson.as_str().to_string(),
        message: rejection.body_text(),
        details: None,
    };

    (StatusCode::BAD_REQUEST, axum::Json(error_response)).into_response()
}

/// JSON extractor without validation.
///
/// Use this where the handler normalizes the payload before validating it,
/// so validation runs on the cleaned-up values rather than the raw body.
/// Extraction failures answer 400 with an [`ErrorResponse`] body.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_response)?;

        Ok(JsonBody(data))
    }
}
