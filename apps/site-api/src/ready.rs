//! Readiness endpoint reporting which external integrations are configured.
//!
//! Unlike `/health` (pure liveness), `/ready` tells an operator whether the
//! process was started with delivery and gateway credentials. Only presence
//! booleans are reported, never the values themselves.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_notifications::Dispatcher;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReadyState {
    pub dispatcher: Arc<Dispatcher>,
    pub gateway_configured: bool,
}

async fn ready_handler(
    State(state): State<ReadyState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let email_configured = state.dispatcher.is_configured();
    let gateway_configured = state.gateway_configured;

    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "email_provider",
            Box::pin(async move {
                if email_configured {
                    Ok(())
                } else {
                    Err("delivery credentials not set".to_string())
                }
            }),
        ),
        (
            "payment_gateway",
            Box::pin(async move {
                if gateway_configured {
                    Ok(())
                } else {
                    Err("gateway credentials not set".to_string())
                }
            }),
        ),
    ];

    run_health_checks(checks).await
}

pub fn ready_router(state: ReadyState) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(state)
}
