use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_helpers::ValidatedJson;
use axum_helpers::errors::responses::{
    BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PaymentResult;
use crate::models::{
    CreatePaymentRequest, CreatePaymentResponse, FormLogRequest, FormLogResponse,
    FormLogsResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};
use crate::service::PaymentService;

const TAG: &str = "payments";

/// OpenAPI documentation for the payments API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_payment,
        verify_payment,
        log_form,
        read_form_logs,
        fetch_order,
        fetch_payment
    ),
    components(
        schemas(
            CreatePaymentRequest,
            CreatePaymentResponse,
            VerifyPaymentRequest,
            VerifyPaymentResponse,
            FormLogRequest,
            FormLogResponse,
            FormLogsResponse
        ),
        responses(
            BadRequestValidationResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Payment order and verification endpoints")
    )
)]
pub struct ApiDoc;

/// Create the payments router with all HTTP endpoints
pub fn router(service: PaymentService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/payments/create", post(create_payment))
        .route("/payments/verify", post(verify_payment))
        .route("/payments/log", post(log_form).get(read_form_logs))
        .route("/payments/orders/{order_id}", get(fetch_order))
        .route("/payments/payments/{payment_id}", get(fetch_payment))
        .with_state(shared_service)
}

/// Create a payment order
#[utoipa::path(
    post,
    path = "/payments/create",
    tag = TAG,
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Order created", body = CreatePaymentResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_payment(
    State(service): State<Arc<PaymentService>>,
    ValidatedJson(req): ValidatedJson<CreatePaymentRequest>,
) -> PaymentResult<Json<CreatePaymentResponse>> {
    let response = service.create_payment(req).await?;
    Ok(Json(response))
}

/// Verify a payment signature
#[utoipa::path(
    post,
    path = "/payments/verify",
    tag = TAG,
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified", body = VerifyPaymentResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn verify_payment(
    State(service): State<Arc<PaymentService>>,
    ValidatedJson(req): ValidatedJson<VerifyPaymentRequest>,
) -> PaymentResult<Json<VerifyPaymentResponse>> {
    let response = service.verify_payment(req).await?;
    Ok(Json(response))
}

/// Append a payment interest entry to the form log
#[utoipa::path(
    post,
    path = "/payments/log",
    tag = TAG,
    request_body = FormLogRequest,
    responses(
        (status = 200, description = "Entry logged", body = FormLogResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn log_form(
    State(service): State<Arc<PaymentService>>,
    ValidatedJson(req): ValidatedJson<FormLogRequest>,
) -> PaymentResult<Json<FormLogResponse>> {
    let response = service.log_form(req).await?;
    Ok(Json(response))
}

/// Read back the form log
#[utoipa::path(
    get,
    path = "/payments/log",
    tag = TAG,
    responses(
        (status = 200, description = "Logged entries", body = FormLogsResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn read_form_logs(
    State(service): State<Arc<PaymentService>>,
) -> PaymentResult<Json<FormLogsResponse>> {
    let logs = service.read_form_logs().await?;
    Ok(Json(FormLogsResponse { logs }))
}

/// Fetch a gateway order (diagnostics)
#[utoipa::path(
    get,
    path = "/payments/orders/{order_id}",
    tag = TAG,
    params(("order_id" = String, Path, description = "Gateway order ID")),
    responses(
        (status = 200, description = "Gateway order object"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn fetch_order(
    State(service): State<Arc<PaymentService>>,
    Path(order_id): Path<String>,
) -> PaymentResult<Json<serde_json::Value>> {
    let order = service.fetch_order(&order_id).await?;
    Ok(Json(order))
}

/// Fetch a gateway payment (diagnostics)
#[utoipa::path(
    get,
    path = "/payments/payments/{payment_id}",
    tag = TAG,
    params(("payment_id" = String, Path, description = "Gateway payment ID")),
    responses(
        (status = 200, description = "Gateway payment object"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn fetch_payment(
    State(service): State<Arc<PaymentService>>,
    Path(payment_id): Path<String>,
) -> PaymentResult<Json<serde_json::Value>> {
    let payment = service.fetch_payment(&payment_id).await?;
    Ok(Json(payment))
}
