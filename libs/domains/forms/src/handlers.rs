use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use axum_helpers::JsonBody;
use axum_helpers::errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::FormResult;
use crate::models::{ContactForm, DemoRequestForm, FormHealthResponse, SubmissionResponse};
use crate::service::FormService;

const TAG: &str = "forms";

/// OpenAPI documentation for the forms API
#[derive(OpenApi)]
#[openapi(
    paths(submit_contact, contact_health, submit_demo_request, demo_health),
    components(
        schemas(ContactForm, DemoRequestForm, SubmissionResponse, FormHealthResponse),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Contact and demo request form endpoints")
    )
)]
pub struct ApiDoc;

/// Create the forms router with all HTTP endpoints
pub fn router(service: FormService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/contact", get(contact_health).post(submit_contact))
        .route("/demo/request", get(demo_health).post(submit_demo_request))
        .with_state(shared_service)
}

/// Submit a contact form enquiry
#[utoipa::path(
    post,
    path = "/contact",
    tag = TAG,
    request_body = ContactForm,
    responses(
        (status = 200, description = "Enquiry accepted", body = SubmissionResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn submit_contact(
    State(service): State<Arc<FormService>>,
    JsonBody(form): JsonBody<ContactForm>,
) -> FormResult<Json<SubmissionResponse>> {
    service.submit_contact(form)?;
    Ok(Json(SubmissionResponse {
        message: "Thank you for contacting us! We'll get back to you within 24 hours.".to_string(),
    }))
}

/// Contact form configuration status
#[utoipa::path(
    get,
    path = "/contact",
    tag = TAG,
    responses(
        (status = 200, description = "Service status", body = FormHealthResponse)
    )
)]
async fn contact_health(State(service): State<Arc<FormService>>) -> Json<FormHealthResponse> {
    Json(service.health("Contact Form API"))
}

/// Submit a demo request
#[utoipa::path(
    post,
    path = "/demo/request",
    tag = TAG,
    request_body = DemoRequestForm,
    responses(
        (status = 200, description = "Demo request accepted", body = SubmissionResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn submit_demo_request(
    State(service): State<Arc<FormService>>,
    JsonBody(form): JsonBody<DemoRequestForm>,
) -> FormResult<Json<SubmissionResponse>> {
    service.submit_demo_request(form)?;
    Ok(Json(SubmissionResponse {
        message: "Demo request submitted successfully. Our team will contact you soon."
            .to_string(),
    }))
}

/// Demo request configuration status
#[utoipa::path(
    get,
    path = "/demo/request",
    tag = TAG,
    responses(
        (status = 200, description = "Service status", body = FormHealthResponse)
    )
)]
async fn demo_health(State(service): State<Arc<FormService>>) -> Json<FormHealthResponse> {
    Json(service.health("Demo Request API"))
}
