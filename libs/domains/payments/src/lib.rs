//! # Payments Domain
//!
//! Payment order creation and verification against a Razorpay-style gateway,
//! plus an append-only form log for payment interest submissions.
//!
//! Amounts cross the gateway boundary in integer minor units (paise);
//! request payloads carry major units. Checkout callbacks are authenticated
//! with an HMAC-SHA256 signature over `order_id|payment_id`, compared in
//! constant time.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_payments::{handlers, FormLog, PaymentService, RazorpayClient};
//! use domain_notifications::{Dispatcher, TemplateEngine};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Arc::new(RazorpayClient::from_env()?);
//! let dispatcher = Arc::new(Dispatcher::with_default_config(None));
//! let service = PaymentService::new(
//!     gateway,
//!     dispatcher,
//!     TemplateEngine::new()?,
//!     FormLog::from_env(),
//! );
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod form_log;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod service;
pub mod signature;

// Re-export commonly used types
pub use error::{PaymentError, PaymentResult};
pub use form_log::FormLog;
pub use gateway::{PaymentGateway, RazorpayClient, RazorpayConfig};
pub use models::{
    CreatePaymentRequest, CreatePaymentResponse, FormLogRequest, FormLogResponse,
    FormLogsResponse, VerifyPaymentRequest, VerifyPaymentResponse, to_minor_units,
};
pub use service::PaymentService;
pub use signature::verify_payment_signature;
