//! Handler tests for the forms domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! The dispatcher runs unconfigured (no provider), so jobs are queued and
//! counted without any network traffic.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_forms::*;
use domain_notifications::{Dispatcher, DispatcherConfig, TemplateEngine};
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_app() -> (Router, Arc<Dispatcher>) {
    let dispatcher = Arc::new(Dispatcher::new(
        None,
        DispatcherConfig {
            workers: 1,
            queue_capacity: 16,
        },
    ));
    let service = FormService::new(
        Arc::clone(&dispatcher),
        TemplateEngine::new().unwrap(),
        FormsConfig {
            admin_email: "admin@advolcano.io".to_string(),
            sender_email: "noreply@advolcano.io".to_string(),
        },
    );
    (handlers::router(service), dispatcher)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_contact_valid_payload_returns_200_and_queues_one_job() {
    let (app, dispatcher) = test_app();

    let response = app
        .oneshot(post_json(
            "/contact",
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "subject": "Pricing question",
                "message": "How does billing work for small teams?"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: SubmissionResponse = json_body(response.into_body()).await;
    assert!(body.message.contains("Thank you"));
    assert_eq!(dispatcher.metrics().submitted, 1);
}

#[tokio::test]
async fn test_contact_missing_required_field_returns_400_and_no_job() {
    let (app, dispatcher) = test_app();

    // No subject
    let response = app
        .oneshot(post_json(
            "/contact",
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "subject": ""
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(dispatcher.metrics().submitted, 0);
}

#[tokio::test]
async fn test_contact_omitted_required_field_returns_400_and_no_job() {
    let (app, dispatcher) = test_app();

    // The subject key is absent entirely, not just empty. Extraction
    // itself must answer 400, not axum's default 422.
    let response = app
        .oneshot(post_json(
            "/contact",
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(dispatcher.metrics().submitted, 0);
}

#[tokio::test]
async fn test_contact_invalid_email_returns_400() {
    let (app, dispatcher) = test_app();

    let response = app
        .oneshot(post_json(
            "/contact",
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "not-an-email",
                "subject": "Hello"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(dispatcher.metrics().submitted, 0);
}

#[tokio::test]
async fn test_contact_spam_is_rejected_before_any_job() {
    let (app, dispatcher) = test_app();

    // Two signals: URL + denylisted keyword.
    let response = app
        .oneshot(post_json(
            "/contact",
            json!({
                "first_name": "Spam",
                "last_name": "Bot",
                "email": "bot@example.com",
                "subject": "Hello",
                "message": "You are a winner! Claim at https://spam.example now"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(dispatcher.metrics().submitted, 0);
}

#[tokio::test]
async fn test_contact_single_spam_signal_is_accepted() {
    let (app, dispatcher) = test_app();

    // Only one signal (a URL) must not trip the heuristic.
    let response = app
        .oneshot(post_json(
            "/contact",
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "subject": "Integration",
                "message": "Our docs live at https://example.com/docs, can you integrate with them?"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(dispatcher.metrics().submitted, 1);
}

#[tokio::test]
async fn test_contact_health_reports_configuration_without_secrets() {
    let (app, _dispatcher) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/contact")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: FormHealthResponse = json_body(response.into_body()).await;
    assert_eq!(body.status, "healthy");
    assert_eq!(body.service, "Contact Form API");
    assert!(!body.delivery_configured);
    assert_eq!(body.admin_email, "admin@advolcano.io");
}

#[tokio::test]
async fn test_demo_request_valid_payload_returns_200_and_queues_one_job() {
    let (app, dispatcher) = test_app();

    let response = app
        .oneshot(post_json(
            "/demo/request",
            json!({
                "interest": "Programmatic advertising",
                "full_name": "Grace Hopper",
                "email": "grace@example.com",
                "company": "Navy Labs"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: SubmissionResponse = json_body(response.into_body()).await;
    assert!(body.message.contains("Demo request"));
    assert_eq!(dispatcher.metrics().submitted, 1);
}

#[tokio::test]
async fn test_demo_request_missing_interest_returns_400() {
    let (app, dispatcher) = test_app();

    let response = app
        .oneshot(post_json(
            "/demo/request",
            json!({
                "interest": "",
                "full_name": "Grace Hopper",
                "email": "grace@example.com"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(dispatcher.metrics().submitted, 0);
}

#[tokio::test]
async fn test_demo_health_reports_service_name() {
    let (app, _dispatcher) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/demo/request")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: FormHealthResponse = json_body(response.into_body()).await;
    assert_eq!(body.service, "Demo Request API");
}
