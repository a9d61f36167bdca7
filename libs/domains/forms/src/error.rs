use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Submission flagged as spam")]
    SpamDetected,

    #[error("Invalid input")]
    Validation(#[from] ValidationErrors),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type FormResult<T> = Result<T, FormError>;

impl From<domain_notifications::NotificationError> for FormError {
    fn from(err: domain_notifications::NotificationError) -> Self {
        use domain_notifications::NotificationError;
        match err {
            NotificationError::TemplateError(msg) => FormError::Template(msg),
            other => FormError::Internal(other.to_string()),
        }
    }
}

/// Convert FormError to AppError for standardized error responses
impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::SpamDetected => AppError::BadRequest(
                "Your message appears to contain spam content. Please revise and try again."
                    .to_string(),
            ),
            FormError::Validation(errors) => AppError::ValidationError(errors),
            FormError::Template(msg) => AppError::InternalServerError(msg),
            FormError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
