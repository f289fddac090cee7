use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::features::geolocation::LocationInfo;

/// Database model for a recorded page view
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, ToSchema)]
pub struct Visitor {
    pub id: i64,
    pub ip_address: String,
    pub visit_time: DateTime<Utc>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

/// Visitor row about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisitor {
    pub ip_address: String,
    pub visit_time: DateTime<Utc>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

impl NewVisitor {
    /// A visit happening now, without location data
    pub fn new(ip_address: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            visit_time: Utc::now(),
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

/// Number of visits per country, null countries grouped as "Unknown"
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, ToSchema)]
pub struct CountryCount {
    pub country: String,
    pub visits: i64,
}
