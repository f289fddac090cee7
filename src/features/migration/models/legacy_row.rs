use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::core::error::{RepoResult, StorageError};
use crate::features::contact::models::NewContact;
use crate::features::migration::services::timestamps::coerce_timestamp;
use crate::features::visitors::models::NewVisitor;

/// Visitor row as found in the legacy store. Nothing is guaranteed non-null
/// there and timestamps are whatever text was written.
#[derive(Debug, Clone, Default, FromRow)]
pub struct LegacyVisitorRow {
    pub ip_address: Option<String>,
    pub visit_time: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, FromRow)]
pub struct LegacyContactRow {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub submission_time: Option<String>,
    pub ip_address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

fn required(value: Option<String>, table: &str, column: &str) -> RepoResult<String> {
    value.ok_or_else(|| StorageError::InvalidRecord(format!("{} row without {}", table, column)))
}

impl LegacyVisitorRow {
    /// Target record; `now` replaces a missing or unreadable `visit_time`
    pub fn into_new_visitor(self, now: DateTime<Utc>) -> RepoResult<NewVisitor> {
        Ok(NewVisitor {
            ip_address: required(self.ip_address, "visitor", "ip_address")?,
            visit_time: coerce_timestamp(self.visit_time.as_deref(), now),
            country: self.country,
            city: self.city,
            region: self.region,
        })
    }
}

impl LegacyContactRow {
    pub fn into_new_contact(self, now: DateTime<Utc>) -> RepoResult<NewContact> {
        Ok(NewContact {
            name: required(self.name, "contact_submission", "name")?,
            email: required(self.email, "contact_submission", "email")?,
            message: required(self.message, "contact_submission", "message")?,
            submission_time: coerce_timestamp(self.submission_time.as_deref(), now),
            ip_address: self.ip_address,
            country: self.country,
            city: self.city,
            region: self.region,
        })
    }
}
