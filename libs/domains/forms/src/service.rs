//! Business logic for the contact and demo request forms.

use crate::error::{FormError, FormResult};
use crate::models::{ContactForm, DemoRequestForm, FormHealthResponse};
use crate::spam;
use chrono::Utc;
use domain_notifications::models::{ContactEnquiryData, DemoRequestData};
use domain_notifications::{Dispatcher, NotificationJob, NotificationKind, TemplateEngine};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Addressing configuration for form notifications.
#[derive(Debug, Clone)]
pub struct FormsConfig {
    /// Recipient of admin notifications.
    pub admin_email: String,
    /// Verified sender address reported by the health endpoints.
    pub sender_email: String,
}

/// Service handling form submissions.
pub struct FormService {
    dispatcher: Arc<Dispatcher>,
    templates: TemplateEngine,
    config: FormsConfig,
}

impl FormService {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        templates: TemplateEngine,
        config: FormsConfig,
    ) -> Self {
        Self {
            dispatcher,
            templates,
            config,
        }
    }

    /// Validate, screen, and queue a contact form enquiry.
    ///
    /// The admin notification is best-effort: a full queue or closed
    /// dispatcher is logged and the submission still succeeds.
    pub fn submit_contact(&self, form: ContactForm) -> FormResult<()> {
        let form = form.normalized();
        form.validate()?;

        let message = form.message.as_deref().unwrap_or("");
        if spam::is_spam(message) {
            warn!(email = %form.email, "Potential spam detected in contact form");
            return Err(FormError::SpamDetected);
        }

        info!(
            name = %format!("{} {}", form.first_name, form.last_name),
            email = %form.email,
            subject = %form.subject,
            "Contact form submitted"
        );

        let rendered = self.templates.render_contact_enquiry(&ContactEnquiryData {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            company: form.company.clone(),
            subject: form.subject.clone(),
            message: form.message.clone(),
            submitted_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        })?;

        let job = NotificationJob::new(
            NotificationKind::ContactEnquiry,
            self.config.admin_email.clone(),
            "Admin".to_string(),
            rendered.subject,
            rendered.html,
            rendered.text,
            Some(form.email.clone()),
        );

        if let Err(e) = self.dispatcher.submit(job) {
            warn!(error = %e, "Contact notification not queued");
        }

        Ok(())
    }

    /// Validate and queue a demo request.
    pub fn submit_demo_request(&self, form: DemoRequestForm) -> FormResult<()> {
        let form = form.normalized();
        form.validate()?;

        let message = form.message.as_deref().unwrap_or("");
        if spam::is_spam(message) {
            warn!(email = %form.email, "Potential spam detected in demo request");
            return Err(FormError::SpamDetected);
        }

        info!(
            name = %form.full_name,
            email = %form.email,
            interest = %form.interest,
            "Demo request submitted"
        );

        let rendered = self.templates.render_demo_request(&DemoRequestData {
            interest: form.interest.clone(),
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            company: form.company.clone(),
            message: form.message.clone(),
            submitted_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        })?;

        let job = NotificationJob::new(
            NotificationKind::DemoRequest,
            self.config.admin_email.clone(),
            "Admin".to_string(),
            rendered.subject,
            rendered.html,
            rendered.text,
            Some(form.email.clone()),
        );

        if let Err(e) = self.dispatcher.submit(job) {
            warn!(error = %e, "Demo request notification not queued");
        }

        Ok(())
    }

    /// Configuration status for a named form service, without secrets.
    pub fn health(&self, service: &str) -> FormHealthResponse {
        FormHealthResponse {
            status: "healthy".to_string(),
            service: service.to_string(),
            delivery_configured: self.dispatcher.is_configured(),
            admin_email: self.config.admin_email.clone(),
            sender_email: self.config.sender_email.clone(),
        }
    }

    /// Dispatcher handle, exposed for composition and tests.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }
}
