use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::features::contact::dtos::ContactForm;
use crate::features::geolocation::LocationInfo;

/// Database model for contact submission
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, ToSchema)]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub submission_time: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

/// Contact submission about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: String,
    pub submission_time: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

impl NewContact {
    /// A submission received now from `ip_address`
    pub fn from_form(form: ContactForm, ip_address: impl Into<String>) -> Self {
        Self {
            name: form.name,
            email: form.email,
            message: form.message,
            submission_time: Utc::now(),
            ip_address: Some(ip_address.into()),
            country: None,
            city: None,
            region: None,
        }
    }

    pub fn with_location(mut self, location: Option<LocationInfo>) -> Self {
        if let Some(location) = location {
            self.country = Some(location.country);
            self.city = Some(location.city);
            self.region = Some(location.region);
        }
        self
    }
}
