use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Email bounds beyond format: total length and local-part length.
fn validate_email_bounds(email: &str) -> Result<(), validator::ValidationError> {
    if email.len() > 254 {
        return Err(validator::ValidationError::new("email_too_long"));
    }
    if let Some(local) = email.split('@').next()
        && local.len() > 64
    {
        return Err(validator::ValidationError::new("email_local_too_long"));
    }
    Ok(())
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn trimmed_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,

    #[validate(email, custom(function = "validate_email_bounds"))]
    pub email: String,

    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    #[validate(length(max = 2000, message = "Message must be less than 2000 characters"))]
    pub message: Option<String>,

    pub company: Option<String>,

    #[validate(length(max = 20, message = "Phone number must be less than 20 characters"))]
    pub phone: Option<String>,
}

impl ContactForm {
    /// Trim all fields; empty optionals collapse to `None`.
    /// Validation runs on the normalized values.
    pub fn normalized(self) -> Self {
        Self {
            first_name: trimmed(self.first_name),
            last_name: trimmed(self.last_name),
            email: trimmed(self.email),
            subject: trimmed(self.subject),
            message: trimmed_opt(self.message),
            company: trimmed_opt(self.company),
            phone: trimmed_opt(self.phone),
        }
    }
}

/// Demo request submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DemoRequestForm {
    #[validate(length(min = 1, message = "Interest is required"))]
    pub interest: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    #[validate(email, custom(function = "validate_email_bounds"))]
    pub email: String,

    pub company: Option<String>,

    #[validate(length(max = 2000, message = "Message must be less than 2000 characters"))]
    pub message: Option<String>,
}

impl DemoRequestForm {
    /// Trim all fields; empty optionals collapse to `None`.
    pub fn normalized(self) -> Self {
        Self {
            interest: trimmed(self.interest),
            full_name: trimmed(self.full_name),
            email: trimmed(self.email),
            company: trimmed_opt(self.company),
            message: trimmed_opt(self.message),
        }
    }
}

/// Successful submission acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub message: String,
}

/// Health/configuration status for a form endpoint. Reports presence of
/// configuration as booleans; never the secret values themselves.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FormHealthResponse {
    pub status: String,
    pub service: String,
    pub delivery_configured: bool,
    pub admin_email: String,
    pub sender_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactForm {
        ContactForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Pricing".to_string(),
            message: None,
            company: None,
            phone: None,
        }
    }

    #[test]
    fn test_contact_form_valid() {
        assert!(contact().validate().is_ok());
    }

    #[test]
    fn test_normalization_trims_and_drops_empty_optionals() {
        let form = ContactForm {
            first_name: "  Ada  ".to_string(),
            message: Some("   ".to_string()),
            company: Some(" Analytical Engines ".to_string()),
            ..contact()
        }
        .normalized();

        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.message, None);
        assert_eq!(form.company, Some("Analytical Engines".to_string()));
    }

    #[test]
    fn test_email_local_part_bound() {
        let form = ContactForm {
            email: format!("{}@example.com", "a".repeat(65)),
            ..contact()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_email_total_length_bound() {
        let form = ContactForm {
            email: format!("a@{}.com", "b".repeat(260)),
            ..contact()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_subject_length_bound() {
        let form = ContactForm {
            subject: "s".repeat(201),
            ..contact()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_whitespace_only_required_field_fails_after_normalization() {
        let form = ContactForm {
            first_name: "   ".to_string(),
            ..contact()
        }
        .normalized();
        assert!(form.validate().is_err());
    }
}
