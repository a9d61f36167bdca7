//! Payment signature verification.
//!
//! Razorpay signs the checkout callback with
//! HMAC-SHA256(key_secret, "order_id|payment_id"), hex encoded.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Verify a payment callback signature.
///
/// Returns `true` only when `signature` matches the expected hex digest for
/// the given order and payment IDs.
pub fn verify_payment_signature(
    key_secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    if key_secret.is_empty() || order_id.is_empty() || payment_id.is_empty() || signature.is_empty()
    {
        warn!(
            has_order_id = !order_id.is_empty(),
            has_payment_id = !payment_id.is_empty(),
            has_signature = !signature.is_empty(),
            "payment_signature_missing_fields"
        );
        return false;
    }

    let mut mac = match HmacSha256::new_from_slice(key_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("payment_signature_invalid_key");
            return false;
        }
    };

    mac.update(format!("{}|{}", order_id, payment_id).as_bytes());

    let expected_signature = hex::encode(mac.finalize().into_bytes());

    // Constant-time comparison to prevent timing attacks
    let valid = constant_time_compare(&expected_signature, signature);

    if !valid {
        warn!(
            expected_length = expected_signature.len(),
            actual_length = signature.len(),
            "payment_signature_mismatch"
        );
    }

    valid
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_valid_signature_verifies() {
        let sig = sign("secret", "order_1", "pay_1");
        assert!(verify_payment_signature("secret", "order_1", "pay_1", &sig));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let mut sig = sign("secret", "order_1", "pay_1");
        // Flip the last hex character.
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });
        assert!(!verify_payment_signature("secret", "order_1", "pay_1", &sig));
    }

    #[test]
    fn test_wrong_payment_id_fails() {
        let sig = sign("secret", "order_1", "pay_1");
        assert!(!verify_payment_signature("secret", "order_1", "pay_2", &sig));
    }

    #[test]
    fn test_empty_fields_fail() {
        assert!(!verify_payment_signature("secret", "order_1", "pay_1", ""));
        assert!(!verify_payment_signature("", "order_1", "pay_1", "abc"));
    }

    #[test]
    fn test_constant_time_compare_length_mismatch() {
        assert!(!constant_time_compare("abc", "abcd"));
        assert!(constant_time_compare("abc", "abc"));
    }
}
