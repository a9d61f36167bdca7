//! Payment gateway client.
//!
//! The [`PaymentGateway`] trait abstracts the Razorpay Orders API so the
//! service layer and tests never touch the network directly.

use crate::error::{PaymentError, PaymentResult};
use crate::signature::verify_payment_signature;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, error, info};

/// Timeout for calls to the gateway API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for payment gateway operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order for `amount_minor` in minor currency units (paise).
    /// Returns the gateway's order object.
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        notes: Value,
    ) -> PaymentResult<Value>;

    /// Fetch an order by gateway ID.
    async fn fetch_order(&self, order_id: &str) -> PaymentResult<Value>;

    /// Fetch a payment by gateway ID.
    async fn fetch_payment(&self, payment_id: &str) -> PaymentResult<Value>;

    /// Verify the checkout callback signature for an order/payment pair.
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;

    /// Public key ID handed to the checkout frontend.
    fn key_id(&self) -> &str;
}

/// Razorpay API configuration.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// Public key ID (safe to expose to the checkout page).
    pub key_id: String,
    /// Secret key, used for basic auth and signature verification.
    pub key_secret: String,
    /// API base URL (defaults to production).
    pub api_url: String,
}

impl RazorpayConfig {
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self {
            key_id,
            key_secret,
            api_url: "https://api.razorpay.com/v1".to_string(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Blank values count as absent, so empty keys in a deployment manifest
    /// leave the gateway unconfigured rather than failing on the first call.
    pub fn from_env() -> PaymentResult<Self> {
        let key_id = core_config::env_optional("RAZORPAY_KEY_ID")
            .ok_or_else(|| PaymentError::Internal("RAZORPAY_KEY_ID not set".to_string()))?;
        let key_secret = core_config::env_optional("RAZORPAY_KEY_SECRET")
            .ok_or_else(|| PaymentError::Internal("RAZORPAY_KEY_SECRET not set".to_string()))?;
        Ok(Self::new(key_id, key_secret))
    }
}

/// Razorpay gateway client over the Orders API.
pub struct RazorpayClient {
    config: RazorpayConfig,
    client: Client,
}

impl RazorpayClient {
    pub fn new(config: RazorpayConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PaymentError::Internal(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(RazorpayConfig::from_env()?)
    }

    async fn get_json(&self, url: String) -> PaymentResult<Value> {
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if status.is_success() {
            Ok(body)
        } else {
            error!(%status, %url, "Gateway fetch failed");
            Err(PaymentError::Gateway(format!(
                "gateway returned {}: {}",
                status, body
            )))
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        notes: Value,
    ) -> PaymentResult<Value> {
        let order_data = json!({
            "amount": amount_minor,
            "currency": currency,
            "payment_capture": 1,
            "notes": notes,
        });

        debug!(amount_minor, currency, "Creating gateway order");

        let response = self
            .client
            .post(format!("{}/orders", self.config.api_url))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&order_data)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if status.is_success() {
            info!(
                order_id = body.get("id").and_then(|v| v.as_str()).unwrap_or("<missing>"),
                amount_minor,
                "Gateway order created"
            );
            Ok(body)
        } else {
            error!(%status, error = %body, "Gateway order creation failed");
            Err(PaymentError::Gateway(format!(
                "order creation returned {}: {}",
                status, body
            )))
        }
    }

    async fn fetch_order(&self, order_id: &str) -> PaymentResult<Value> {
        self.get_json(format!("{}/orders/{}", self.config.api_url, order_id))
            .await
    }

    async fn fetch_payment(&self, payment_id: &str) -> PaymentResult<Value> {
        self.get_json(format!("{}/payments/{}", self.config.api_url, payment_id))
            .await
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_payment_signature(&self.config.key_secret, order_id, payment_id, signature)
    }

    fn key_id(&self) -> &str {
        &self.config.key_id
    }
}
