use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Payment order creation request. Amounts arrive in major currency units.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 15))]
    pub phone_number: String,

    #[validate(range(min = 0.01))]
    pub amount_usd: f64,

    #[validate(range(min = 0.01))]
    pub amount_inr: f64,

    #[validate(range(min = 0.0))]
    pub commission: f64,

    #[validate(range(min = 0.0))]
    pub gst: f64,

    #[validate(range(min = 0.01))]
    pub total_amount: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentResponse {
    pub order_id: String,
    pub razorpay_key: String,
    pub amount_inr: f64,
}

/// Payment verification callback payload from the checkout flow.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1))]
    pub razorpay_order_id: String,

    #[validate(length(min = 1))]
    pub razorpay_payment_id: String,

    #[validate(length(min = 1))]
    pub razorpay_signature: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub status: String,
}

/// Payment interest form entry, appended to the local log file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FormLogRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 15))]
    pub phone: String,

    #[validate(range(min = 0.01))]
    pub usd: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FormLogResponse {
    pub message: String,
    pub uuid: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FormLogsResponse {
    pub logs: Vec<String>,
}

/// Convert a major-unit amount to integer minor units (INR → paise),
/// rounding halves away from zero: 123.456 → 12346.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Round a major-unit amount to two decimal places for display.
pub fn round_major(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_rounds_half_up() {
        assert_eq!(to_minor_units(123.456), 12346);
        assert_eq!(to_minor_units(123.454), 12345);
        assert_eq!(to_minor_units(123.455), 12346);
        assert_eq!(to_minor_units(100.0), 10000);
        assert_eq!(to_minor_units(0.01), 1);
    }

    #[test]
    fn test_round_major() {
        assert_eq!(round_major(123.456), 123.46);
        assert_eq!(round_major(123.4), 123.4);
    }

    #[test]
    fn test_create_payment_request_rejects_zero_total() {
        let req = CreatePaymentRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "9999999999".to_string(),
            amount_usd: 10.0,
            amount_inr: 830.0,
            commission: 10.0,
            gst: 5.0,
            total_amount: 0.0,
        };
        assert!(req.validate().is_err());
    }
}
