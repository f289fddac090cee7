use serde::Deserialize;
use validator::Validate;

use crate::shared::constants::{FLASH_INVALID_EMAIL, FLASH_MISSING_FIELDS};
use crate::shared::validation::validate_email_domain;

/// Form body posted to `/contact`. Absent fields deserialize as empty strings
/// so they fail validation instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format"),
        custom(function = validate_email_domain, message = "Email domain must contain a dot")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Why a contact form was turned away, in the order the checks apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRejection {
    MissingFields,
    InvalidEmail,
}

impl ContactRejection {
    /// Flash text shown to the visitor
    pub fn message(&self) -> &'static str {
        match self {
            ContactRejection::MissingFields => FLASH_MISSING_FIELDS,
            ContactRejection::InvalidEmail => FLASH_INVALID_EMAIL,
        }
    }
}

impl ContactForm {
    /// Same form with surrounding whitespace removed from every field
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// A missing field wins over a malformed email
    pub fn check(&self) -> Result<(), ContactRejection> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let missing = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .any(|e| e.code == "length");

        if missing {
            Err(ContactRejection::MissingFields)
        } else {
            Err(ContactRejection::InvalidEmail)
        }
    }
}
