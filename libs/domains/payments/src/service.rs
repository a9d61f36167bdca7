//! Business logic for payment orders, verification, and the form log.

use crate::error::{PaymentError, PaymentResult};
use crate::form_log::FormLog;
use crate::gateway::PaymentGateway;
use crate::models::{
    CreatePaymentRequest, CreatePaymentResponse, FormLogRequest, FormLogResponse,
    VerifyPaymentRequest, VerifyPaymentResponse, round_major, to_minor_units,
};
use domain_notifications::models::{PaymentInitiatedData, PaymentVerifiedData};
use domain_notifications::{Dispatcher, NotificationJob, NotificationKind, TemplateEngine};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// Service handling payment operations against the gateway.
pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
    dispatcher: Arc<Dispatcher>,
    templates: TemplateEngine,
    form_log: FormLog,
}

impl PaymentService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        dispatcher: Arc<Dispatcher>,
        templates: TemplateEngine,
        form_log: FormLog,
    ) -> Self {
        Self {
            gateway,
            dispatcher,
            templates,
            form_log,
        }
    }

    /// Create a gateway order for the requested total.
    ///
    /// The total arrives in major units (INR) and is converted to integer
    /// paise before the gateway call. On success a confirmation email is
    /// queued best-effort for the customer.
    pub async fn create_payment(
        &self,
        req: CreatePaymentRequest,
    ) -> PaymentResult<CreatePaymentResponse> {
        let amount_minor = to_minor_units(req.total_amount);

        let notes = json!({
            "name": req.name,
            "email": req.email,
            "phone": req.phone_number,
            "amount_usd": req.amount_usd.to_string(),
            "amount_inr": req.amount_inr.to_string(),
            "commission": req.commission.to_string(),
            "gst": req.gst.to_string(),
            "total_amount": req.total_amount.to_string(),
        });

        let order = self
            .gateway
            .create_order(amount_minor, "INR", notes)
            .await?;

        let order_id = order
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| PaymentError::Gateway("order response missing id".to_string()))?
            .to_string();

        info!(
            name = %req.name,
            email = %req.email,
            phone = %req.phone_number,
            amount_usd = req.amount_usd,
            amount_inr = req.amount_inr,
            commission = req.commission,
            gst = req.gst,
            total = req.total_amount,
            order_id = %order_id,
            "Order created"
        );

        self.notify_payment_initiated(&req, &order_id);

        Ok(CreatePaymentResponse {
            order_id,
            razorpay_key: self.gateway.key_id().to_string(),
            amount_inr: round_major(req.total_amount),
        })
    }

    fn notify_payment_initiated(&self, req: &CreatePaymentRequest, order_id: &str) {
        let rendered = match self.templates.render_payment_initiated(&PaymentInitiatedData {
            customer_name: req.name.clone(),
            order_id: order_id.to_string(),
            amount_inr: format!("{:.2}", req.total_amount),
            amount_usd: format!("{:.2}", req.amount_usd),
        }) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Failed to render payment confirmation");
                return;
            }
        };

        let job = NotificationJob::new(
            NotificationKind::PaymentInitiated,
            req.email.clone(),
            req.name.clone(),
            rendered.subject,
            rendered.html,
            rendered.text,
            None,
        );

        if let Err(e) = self.dispatcher.submit(job) {
            warn!(error = %e, "Payment confirmation not queued");
        }
    }

    /// Verify the checkout callback signature.
    ///
    /// A mismatch is a hard 400 and submits no notification of any kind.
    /// On success a `payment_verified` confirmation is queued best-effort
    /// for the customer recorded in the order notes.
    pub async fn verify_payment(
        &self,
        req: VerifyPaymentRequest,
    ) -> PaymentResult<VerifyPaymentResponse> {
        let valid = self.gateway.verify_signature(
            &req.razorpay_order_id,
            &req.razorpay_payment_id,
            &req.razorpay_signature,
        );

        if !valid {
            warn!(
                order_id = %req.razorpay_order_id,
                payment_id = %req.razorpay_payment_id,
                "Payment signature verification failed"
            );
            return Err(PaymentError::SignatureVerification);
        }

        info!(
            order_id = %req.razorpay_order_id,
            payment_id = %req.razorpay_payment_id,
            "Payment verified"
        );

        self.notify_payment_verified(&req.razorpay_order_id, &req.razorpay_payment_id)
            .await;

        Ok(VerifyPaymentResponse {
            status: "verified".to_string(),
        })
    }

    /// Best-effort confirmation email; the customer address comes from the
    /// order notes stored at creation time.
    async fn notify_payment_verified(&self, order_id: &str, payment_id: &str) {
        let order = match self.gateway.fetch_order(order_id).await {
            Ok(o) => o,
            Err(e) => {
                warn!(error = %e, %order_id, "Could not fetch order for confirmation email");
                return;
            }
        };

        let notes = order.get("notes").cloned().unwrap_or(Value::Null);
        let Some(email) = notes.get("email").and_then(Value::as_str) else {
            warn!(%order_id, "Order notes carry no customer email, skipping confirmation");
            return;
        };
        let name = notes
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Customer");

        let rendered = match self.templates.render_payment_verified(&PaymentVerifiedData {
            customer_name: name.to_string(),
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
        }) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Failed to render payment verified email");
                return;
            }
        };

        let job = NotificationJob::new(
            NotificationKind::PaymentVerified,
            email.to_string(),
            name.to_string(),
            rendered.subject,
            rendered.html,
            rendered.text,
            None,
        );

        if let Err(e) = self.dispatcher.submit(job) {
            warn!(error = %e, "Payment verified notification not queued");
        }
    }

    /// Append a payment interest entry to the form log.
    pub async fn log_form(&self, req: FormLogRequest) -> PaymentResult<FormLogResponse> {
        let id = self.form_log.append(&req).await?;
        Ok(FormLogResponse {
            message: "Data saved to log file.".to_string(),
            uuid: id.to_string(),
        })
    }

    /// Read the form log back verbatim.
    pub async fn read_form_logs(&self) -> PaymentResult<Vec<String>> {
        self.form_log.read_all().await
    }

    /// Fetch an order from the gateway, for diagnostics.
    pub async fn fetch_order(&self, order_id: &str) -> PaymentResult<Value> {
        self.gateway.fetch_order(order_id).await
    }

    /// Fetch a payment from the gateway, for diagnostics.
    pub async fn fetch_payment(&self, payment_id: &str) -> PaymentResult<Value> {
        self.gateway.fetch_payment(payment_id).await
    }
}
