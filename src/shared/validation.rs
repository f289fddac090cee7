use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Email shape accepted by the contact form, on top of the RFC syntax check:
    /// a local part, an `@` and a domain containing at least one dot
    /// - Valid: "ana@example.com", "a.b+tag@mail.example.org"
    /// - Invalid: "ana@localhost", "ana @example.com", "@example.com"
    pub static ref EMAIL_DOMAIN_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Custom validator rejecting addresses without a dotted domain
pub fn validate_email_domain(value: &str) -> Result<(), ValidationError> {
    if EMAIL_DOMAIN_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("email_domain"))
    }
}
