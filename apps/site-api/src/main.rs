use axum_helpers::server::{create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::sync::Arc;
use tracing::{info, warn};

mod config;
mod openapi;
mod ready;

use config::Config;
use domain_forms::{FormService, FormsConfig};
use domain_notifications::{Dispatcher, DispatcherConfig, EmailProvider, SendGridProvider};
use domain_payments::{FormLog, PaymentService, RazorpayClient, RazorpayConfig};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // Email delivery is optional: without credentials the dispatcher accepts
    // jobs and drops them, and the health endpoints report the gap.
    let provider: Option<Arc<dyn EmailProvider>> = match SendGridProvider::from_env() {
        Ok(provider) => {
            info!("Email delivery configured via {}", provider.name());
            Some(Arc::new(provider))
        }
        Err(e) => {
            warn!("Email delivery disabled: {}", e);
            None
        }
    };

    let dispatcher = Arc::new(Dispatcher::new(provider, DispatcherConfig::default()));
    let templates = domain_notifications::TemplateEngine::new()
        .map_err(|e| eyre::eyre!("Failed to build template engine: {}", e))?;

    // The gateway degrades the same way the original deployment did: missing
    // credentials leave payment calls failing upstream while the rest of the
    // site keeps working.
    let (gateway, gateway_configured) = match RazorpayClient::from_env() {
        Ok(client) => (client, true),
        Err(e) => {
            warn!("Payment gateway credentials missing, payment calls will fail: {}", e);
            let client = RazorpayClient::new(RazorpayConfig::new(String::new(), String::new()))
                .map_err(|e| eyre::eyre!("Failed to build gateway client: {}", e))?;
            (client, false)
        }
    };

    let form_service = FormService::new(
        dispatcher.clone(),
        templates.clone(),
        FormsConfig {
            admin_email: config.admin_email.clone(),
            sender_email: config.sender_email.clone(),
        },
    );

    let payment_service = PaymentService::new(
        Arc::new(gateway),
        dispatcher.clone(),
        templates,
        FormLog::from_env(),
    );

    // Domain routers carry their own state; compose them under /api
    let api_routes = domain_forms::handlers::router(form_service)
        .merge(domain_payments::handlers::router(payment_service));

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::server::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints into the app
    // - /health: liveness check with app name/version
    // - /ready: readiness check reporting integration configuration
    let app = router
        .merge(health_router(config.app))
        .merge(ready::ready_router(ready::ReadyState {
            dispatcher,
            gateway_configured,
        }));

    info!("Starting site API");

    create_app(app, &config.server).await?;

    Ok(())
}
