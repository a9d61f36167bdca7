//! Data models for the notifications domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Notification Job Types (for the in-process dispatch queue)
// ============================================================================

/// Kinds of notifications the site sends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Admin notification for a contact form enquiry.
    ContactEnquiry,
    /// Admin notification for a demo request.
    DemoRequest,
    /// Customer confirmation that a payment order was created.
    PaymentInitiated,
    /// Customer confirmation that a payment signature verified.
    PaymentVerified,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::ContactEnquiry => write!(f, "contact_enquiry"),
            NotificationKind::DemoRequest => write!(f, "demo_request"),
            NotificationKind::PaymentInitiated => write!(f, "payment_initiated"),
            NotificationKind::PaymentVerified => write!(f, "payment_verified"),
        }
    }
}

/// A fully-rendered notification job to be delivered by the dispatcher.
///
/// Bodies are rendered before submission; the dispatcher never templates
/// content. Jobs are immutable and self-contained so workers need no
/// access to request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationJob {
    /// Unique job identifier, for log correlation.
    pub id: Uuid,
    /// Kind of notification.
    pub kind: NotificationKind,
    /// Recipient email address.
    pub to_email: String,
    /// Recipient name (for personalization).
    pub to_name: String,
    /// Email subject line.
    pub subject: String,
    /// Rendered HTML body.
    pub html_body: String,
    /// Rendered plain text body.
    pub text_body: String,
    /// Reply-To address (e.g. the form submitter).
    pub reply_to: Option<String>,
    /// Job creation timestamp, for queue latency observability.
    pub created_at: DateTime<Utc>,
}

impl NotificationJob {
    /// Create a new notification job.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: NotificationKind,
        to_email: String,
        to_name: String,
        subject: String,
        html_body: String,
        text_body: String,
        reply_to: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            to_email,
            to_name,
            subject,
            html_body,
            text_body,
            reply_to,
            created_at: Utc::now(),
        }
    }
}

/// Receipt returned when a job is accepted onto the queue.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    /// Identifier of the queued job.
    pub job_id: Uuid,
}

// ============================================================================
// Template Data Structures
// ============================================================================

/// Data for rendering the contact enquiry notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactEnquiryData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: String,
    pub message: Option<String>,
    pub submitted_at: String,
}

/// Data for rendering the demo request notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoRequestData {
    pub interest: String,
    pub full_name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: Option<String>,
    pub submitted_at: String,
}

/// Data for rendering the payment initiated confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInitiatedData {
    pub customer_name: String,
    pub order_id: String,
    pub amount_inr: String,
    pub amount_usd: String,
}

/// Data for rendering the payment verified confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerifiedData {
    pub customer_name: String,
    pub order_id: String,
    pub payment_id: String,
}
