//! Contact repository trait (port) and its SQL implementation.

mod sql_contact_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::error::RepoResult;
use crate::features::contact::models::{ContactSubmission, NewContact};
use crate::shared::types::SortOrder;

pub use sql_contact_repository::SqlContactRepository;

/// Optional constraints for listing submissions
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub email: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert one submission, returning its id
    async fn insert(&self, contact: &NewContact) -> RepoResult<i64>;

    /// Insert all submissions in one transaction
    async fn insert_batch(&self, contacts: &[NewContact]) -> RepoResult<u64>;

    /// List submissions ordered on `submission_time`
    async fn list(
        &self,
        filter: &ContactFilter,
        order: SortOrder,
    ) -> RepoResult<Vec<ContactSubmission>>;

    async fn count(&self) -> RepoResult<i64>;
}
