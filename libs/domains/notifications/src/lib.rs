//! # Notifications Domain
//!
//! Best-effort transactional email for the site: contact enquiries, demo
//! requests, and payment confirmations.
//!
//! ## Architecture
//!
//! - **[`dispatcher`]**: bounded in-process job queue with a fixed worker pool
//! - **[`providers`]**: the [`providers::EmailProvider`] trait and the
//!   SendGrid implementation
//! - **[`templates`]**: Handlebars rendering for the notification emails
//! - **[`models`]**: [`models::NotificationJob`] and template data types
//!
//! Handlers render content, build a job, and submit it; delivery happens on
//! worker tasks and never blocks or fails a request.

pub mod dispatcher;
pub mod error;
pub mod models;
pub mod providers;
pub mod templates;

pub use dispatcher::{Dispatcher, DispatcherConfig, DispatcherMetrics};
pub use error::{NotificationError, NotificationResult};
pub use models::{NotificationJob, NotificationKind, SubmissionReceipt};
pub use providers::{EmailContent, EmailProvider, SendGridConfig, SendGridProvider, SentEmail};
pub use templates::{RenderedEmail, TemplateEngine};
