//! # Forms Domain
//!
//! Contact form and demo request endpoints for the marketing site.
//!
//! Submissions are trimmed, validated, and screened by a lightweight spam
//! heuristic before an admin notification is queued on the dispatcher.
//! Notification delivery is best-effort; the HTTP response never waits on
//! or fails because of email.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_forms::{handlers, FormService, FormsConfig};
//! use domain_notifications::{Dispatcher, TemplateEngine};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = Arc::new(Dispatcher::with_default_config(None));
//! let service = FormService::new(
//!     dispatcher,
//!     TemplateEngine::new()?,
//!     FormsConfig {
//!         admin_email: "admin@example.com".to_string(),
//!         sender_email: "noreply@example.com".to_string(),
//!     },
//! );
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod spam;

// Re-export commonly used types
pub use error::{FormError, FormResult};
pub use models::{ContactForm, DemoRequestForm, FormHealthResponse, SubmissionResponse};
pub use service::{FormService, FormsConfig};
