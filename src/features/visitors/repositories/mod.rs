//! Visitor repository trait (port) and its SQL implementation.

mod sql_visitor_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::error::RepoResult;
use crate::features::visitors::models::{CountryCount, NewVisitor, Visitor};
use crate::shared::types::SortOrder;

pub use sql_visitor_repository::SqlVisitorRepository;

/// Optional constraints for listing visitors
#[derive(Debug, Clone, Default)]
pub struct VisitorFilter {
    pub country: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

#[async_trait]
pub trait VisitorRepository: Send + Sync {
    /// Insert one visitor, returning its id
    async fn insert(&self, visitor: &NewVisitor) -> RepoResult<i64>;

    /// Insert all visitors in one transaction; nothing is kept if any row fails
    async fn insert_batch(&self, visitors: &[NewVisitor]) -> RepoResult<u64>;

    /// List visitors ordered on `visit_time`
    async fn list(&self, filter: &VisitorFilter, order: SortOrder) -> RepoResult<Vec<Visitor>>;

    /// Total number of recorded visits
    async fn count(&self) -> RepoResult<i64>;

    /// Visits grouped by country, largest first
    async fn count_by_country(&self) -> RepoResult<Vec<CountryCount>>;
}
