//! Email template rendering engine.
//!
//! This module provides Handlebars-based template rendering for the site's
//! notification emails. Handlebars escapes interpolated values by default,
//! which keeps submitter-controlled fields inert in the HTML bodies.

use crate::error::{NotificationError, NotificationResult};
use crate::models::{
    ContactEnquiryData, DemoRequestData, PaymentInitiatedData, PaymentVerifiedData,
};
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Rendered email content.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    /// HTML body content.
    pub html: String,
    /// Plain text body content.
    pub text: String,
    /// Email subject line.
    pub subject: String,
}

/// Template engine for rendering email templates.
///
/// Cloning is cheap; the registered templates are shared behind an `Arc`.
#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

impl TemplateEngine {
    /// Create a new template engine with all templates registered.
    pub fn new() -> NotificationResult<Self> {
        let mut handlebars = Handlebars::new();

        let templates = [
            ("contact_enquiry_html", CONTACT_ENQUIRY_HTML_TEMPLATE),
            ("contact_enquiry_text", CONTACT_ENQUIRY_TEXT_TEMPLATE),
            ("demo_request_html", DEMO_REQUEST_HTML_TEMPLATE),
            ("demo_request_text", DEMO_REQUEST_TEXT_TEMPLATE),
            ("payment_initiated_html", PAYMENT_INITIATED_HTML_TEMPLATE),
            ("payment_initiated_text", PAYMENT_INITIATED_TEXT_TEMPLATE),
            ("payment_verified_html", PAYMENT_VERIFIED_HTML_TEMPLATE),
            ("payment_verified_text", PAYMENT_VERIFIED_TEXT_TEMPLATE),
        ];

        for (name, template) in templates {
            handlebars.register_template_string(name, template).map_err(|e| {
                NotificationError::TemplateError(format!("Failed to register {}: {}", name, e))
            })?;
        }

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    fn render<T: Serialize>(&self, template_name: &str, data: &T) -> NotificationResult<String> {
        self.handlebars
            .render(template_name, data)
            .map_err(NotificationError::from)
    }

    /// Render the admin notification for a contact form enquiry.
    pub fn render_contact_enquiry(
        &self,
        data: &ContactEnquiryData,
    ) -> NotificationResult<RenderedEmail> {
        debug!(from = %data.email, "Rendering contact enquiry email");

        let html = self.render("contact_enquiry_html", data)?;
        let text = self.render("contact_enquiry_text", data)?;

        Ok(RenderedEmail {
            html,
            text,
            subject: format!(
                "Contact Enquiry from {} {}",
                data.first_name, data.last_name
            ),
        })
    }

    /// Render the admin notification for a demo request.
    pub fn render_demo_request(&self, data: &DemoRequestData) -> NotificationResult<RenderedEmail> {
        debug!(from = %data.email, "Rendering demo request email");

        let html = self.render("demo_request_html", data)?;
        let text = self.render("demo_request_text", data)?;

        Ok(RenderedEmail {
            html,
            text,
            subject: "[AdVolcano] New Demo Request".to_string(),
        })
    }

    /// Render the customer confirmation for a created payment order.
    pub fn render_payment_initiated(
        &self,
        data: &PaymentInitiatedData,
    ) -> NotificationResult<RenderedEmail> {
        debug!(order_id = %data.order_id, "Rendering payment initiated email");

        let html = self.render("payment_initiated_html", data)?;
        let text = self.render("payment_initiated_text", data)?;

        Ok(RenderedEmail {
            html,
            text,
            subject: "Payment Initiated - Order Confirmation".to_string(),
        })
    }

    /// Render the customer confirmation for a verified payment.
    pub fn render_payment_verified(
        &self,
        data: &PaymentVerifiedData,
    ) -> NotificationResult<RenderedEmail> {
        debug!(order_id = %data.order_id, "Rendering payment verified email");

        let html = self.render("payment_verified_html", data)?;
        let text = self.render("payment_verified_text", data)?;

        Ok(RenderedEmail {
            html,
            text,
            subject: "Payment Successful - Confirmation".to_string(),
        })
    }
}

// ============================================================================
// Templates
// ============================================================================

const CONTACT_ENQUIRY_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>New Contact Enquiry</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f4f4f5;">
  <div style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <div style="background-color: #ffffff; border-radius: 8px; padding: 32px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
      <h1 style="color: #18181b; font-size: 20px; font-weight: 600; margin: 0 0 16px 0;">
        New Contact Enquiry
      </h1>
      <div style="background-color: #f7fafc; padding: 20px; border-radius: 6px; margin: 24px 0;">
        <table style="width: 100%; border-collapse: collapse;">
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; width: 140px; vertical-align: top;">Name</td>
            <td style="padding: 8px 0; color: #2d3748;">: {{first_name}} {{last_name}}</td>
          </tr>
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; vertical-align: top;">Email</td>
            <td style="padding: 8px 0; color: #2d3748;">: <a href="mailto:{{email}}" style="color: #3182ce; text-decoration: none;">{{email}}</a></td>
          </tr>
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; vertical-align: top;">Phone</td>
            <td style="padding: 8px 0; color: #2d3748;">: {{#if phone}}{{phone}}{{else}}Not provided{{/if}}</td>
          </tr>
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; vertical-align: top;">Company</td>
            <td style="padding: 8px 0; color: #2d3748;">: {{#if company}}{{company}}{{else}}Not provided{{/if}}</td>
          </tr>
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; vertical-align: top;">Subject</td>
            <td style="padding: 8px 0; color: #2d3748;">: {{subject}}</td>
          </tr>
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; vertical-align: top;">Message</td>
            <td style="padding: 8px 0; color: #2d3748;">: {{#if message}}{{message}}{{else}}No message{{/if}}</td>
          </tr>
        </table>
      </div>
      <p style="margin: 24px 0 0 0; font-size: 14px; color: #718096;">
        This enquiry was submitted via <strong>Advolcano.io</strong> {{submitted_at}}
      </p>
    </div>
  </div>
</body>
</html>"#;

const CONTACT_ENQUIRY_TEXT_TEMPLATE: &str = r#"New Contact Enquiry

Name: {{first_name}} {{last_name}}
Email: {{email}}
Phone: {{#if phone}}{{phone}}{{else}}Not provided{{/if}}
Company: {{#if company}}{{company}}{{else}}Not provided{{/if}}
Subject: {{subject}}
Message: {{#if message}}{{message}}{{else}}No message{{/if}}

Submitted via Advolcano.io {{submitted_at}}"#;

const DEMO_REQUEST_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>New Demo Request</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f4f4f5;">
  <div style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <div style="background-color: #ffffff; border-radius: 8px; padding: 32px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
      <h1 style="color: #18181b; font-size: 20px; font-weight: 600; margin: 0 0 16px 0;">
        New Demo Request
      </h1>
      <p style="color: #52525b; font-size: 15px; line-height: 22px; margin: 0 0 8px 0;">
        A new demo request has been submitted through the website.
      </p>
      <div style="background-color: #f7fafc; padding: 20px; border-radius: 6px; margin: 24px 0;">
        <table style="width: 100%; border-collapse: collapse;">
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; width: 140px; vertical-align: top;">Interest</td>
            <td style="padding: 8px 0; color: #2d3748;">: {{interest}}</td>
          </tr>
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; vertical-align: top;">Full Name</td>
            <td style="padding: 8px 0; color: #2d3748;">: {{full_name}}</td>
          </tr>
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; vertical-align: top;">Email</td>
            <td style="padding: 8px 0; color: #2d3748;">: <a href="mailto:{{email}}" style="color: #3182ce; text-decoration: none;">{{email}}</a></td>
          </tr>
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; vertical-align: top;">Company</td>
            <td style="padding: 8px 0; color: #2d3748;">: {{#if company}}{{company}}{{else}}Not provided{{/if}}</td>
          </tr>
          <tr>
            <td style="padding: 8px 0; color: #4a5568; font-weight: 600; vertical-align: top;">Message</td>
            <td style="padding: 8px 0; color: #2d3748;">: {{#if message}}{{message}}{{else}}No message{{/if}}</td>
          </tr>
        </table>
      </div>
      <p style="margin: 24px 0 0 0; font-size: 14px; color: #718096;">
        This demo request generated from <strong>Advolcano.io</strong> {{submitted_at}}
      </p>
    </div>
  </div>
</body>
</html>"#;

const DEMO_REQUEST_TEXT_TEMPLATE: &str = r#"New Demo Request

Interest: {{interest}}
Full Name: {{full_name}}
Email: {{email}}
Company: {{#if company}}{{company}}{{else}}Not provided{{/if}}
Message: {{#if message}}{{message}}{{else}}No message{{/if}}

Generated from Advolcano.io {{submitted_at}}"#;

const PAYMENT_INITIATED_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Payment Initiated</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;">
  <p>Hi {{customer_name}},</p>
  <p>Your payment has been initiated successfully.</p>
  <p>
    Amount (USD): ${{amount_usd}}<br>
    Amount (INR): &#8377;{{amount_inr}}<br>
    Order ID: {{order_id}}
  </p>
  <p>Thank you,<br>Your Payment Team</p>
</body>
</html>"#;

const PAYMENT_INITIATED_TEXT_TEMPLATE: &str = r#"Hi {{customer_name}},

Your payment has been initiated successfully.

Details:
- Amount (USD): ${{amount_usd}}
- Amount (INR): Rs {{amount_inr}}
- Order ID: {{order_id}}

Thank you,
Your Payment Team"#;

const PAYMENT_VERIFIED_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Payment Successful</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;">
  <p>Hi {{customer_name}},</p>
  <p>Your payment has been verified successfully.</p>
  <p>
    Order ID: {{order_id}}<br>
    Payment ID: {{payment_id}}
  </p>
  <p>Thank you,<br>Your Payment Team</p>
</body>
</html>"#;

const PAYMENT_VERIFIED_TEXT_TEMPLATE: &str = r#"Hi {{customer_name}},

Your payment has been verified successfully.

Details:
- Order ID: {{order_id}}
- Payment ID: {{payment_id}}

Thank you,
Your Payment Team"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TemplateEngine {
        TemplateEngine::new().unwrap()
    }

    #[test]
    fn test_contact_enquiry_renders_fields() {
        let rendered = engine()
            .render_contact_enquiry(&ContactEnquiryData {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: Some("+441234567890".to_string()),
                company: None,
                subject: "Pricing".to_string(),
                message: Some("Tell me more".to_string()),
                submitted_at: "2026-01-01 10:00 UTC".to_string(),
            })
            .unwrap();

        assert!(rendered.html.contains("Ada"));
        assert!(rendered.html.contains("ada@example.com"));
        assert!(rendered.html.contains("Not provided"));
        assert!(rendered.text.contains("Pricing"));
        assert_eq!(rendered.subject, "Contact Enquiry from Ada Lovelace");
    }

    #[test]
    fn test_engine_clone_shares_templates() {
        let original = engine();
        let clone = original.clone();

        let data = PaymentVerifiedData {
            customer_name: "Ada".to_string(),
            order_id: "order_1".to_string(),
            payment_id: "pay_1".to_string(),
        };

        let a = original.render_payment_verified(&data).unwrap();
        let b = clone.render_payment_verified(&data).unwrap();
        assert_eq!(a.subject, b.subject);
        assert_eq!(a.html, b.html);
    }

    #[test]
    fn test_html_escapes_submitter_content() {
        let rendered = engine()
            .render_contact_enquiry(&ContactEnquiryData {
                first_name: "<script>alert(1)</script>".to_string(),
                last_name: "X".to_string(),
                email: "x@example.com".to_string(),
                phone: None,
                company: None,
                subject: "hi".to_string(),
                message: None,
                submitted_at: "now".to_string(),
            })
            .unwrap();

        assert!(!rendered.html.contains("<script>"));
        assert!(rendered.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_payment_initiated_renders_order_id() {
        let rendered = engine()
            .render_payment_initiated(&PaymentInitiatedData {
                customer_name: "Ada".to_string(),
                order_id: "order_123".to_string(),
                amount_inr: "10234.50".to_string(),
                amount_usd: "123.45".to_string(),
            })
            .unwrap();

        assert!(rendered.text.contains("order_123"));
        assert_eq!(rendered.subject, "Payment Initiated - Order Confirmation");
    }

    #[test]
    fn test_payment_verified_renders_payment_id() {
        let rendered = engine()
            .render_payment_verified(&PaymentVerifiedData {
                customer_name: "Ada".to_string(),
                order_id: "order_123".to_string(),
                payment_id: "pay_456".to_string(),
            })
            .unwrap();

        assert!(rendered.text.contains("pay_456"));
        assert!(rendered.html.contains("order_123"));
    }
}
