use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Invalid input")]
    Validation(#[from] ValidationErrors),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Signature verification failed")]
    SignatureVerification,

    #[error("Log file not found")]
    LogNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PaymentResult<T> = Result<T, PaymentError>;

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        PaymentError::Gateway(err.to_string())
    }
}

/// Convert PaymentError to AppError for standardized error responses.
///
/// Gateway failures surface as a generic 500; the cause is logged
/// server-side and never echoed to the client.
impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Validation(errors) => AppError::ValidationError(errors),
            PaymentError::Gateway(msg) => AppError::InternalServerError(msg),
            PaymentError::SignatureVerification => {
                AppError::BadRequest("Signature verification failed".to_string())
            }
            PaymentError::LogNotFound => AppError::NotFound("Log file not found.".to_string()),
            PaymentError::Io(e) => AppError::InternalServerError(e.to_string()),
            PaymentError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
