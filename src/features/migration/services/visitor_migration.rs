use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::error::RepoResult;
use crate::features::migration::models::LegacyVisitorRow;
use crate::features::migration::repositories::{LegacyStore, LegacyTable};
use crate::features::migration::services::MigrationJob;
use crate::features::visitors::models::NewVisitor;
use crate::features::visitors::VisitorRepository;

/// Copies legacy `visitor` rows into the primary store
pub struct VisitorMigration {
    source: Arc<LegacyStore>,
    target: Arc<dyn VisitorRepository>,
}

impl VisitorMigration {
    pub fn new(source: Arc<LegacyStore>, target: Arc<dyn VisitorRepository>) -> Self {
        Self { source, target }
    }
}

#[async_trait]
impl MigrationJob for VisitorMigration {
    type Row = LegacyVisitorRow;

    fn name(&self) -> &'static str {
        LegacyTable::Visitor.name()
    }

    async fn source_exists(&self) -> RepoResult<bool> {
        self.source.table_exists(LegacyTable::Visitor).await
    }

    async fn source_count(&self) -> RepoResult<i64> {
        self.source.count(LegacyTable::Visitor).await
    }

    async fn fetch_page(&self, offset: i64, limit: i64) -> RepoResult<Vec<LegacyVisitorRow>> {
        self.source.fetch_visitors(offset, limit).await
    }

    async fn commit_page(&self, rows: Vec<LegacyVisitorRow>) -> RepoResult<u64> {
        let now = Utc::now();
        let visitors = rows
            .into_iter()
            .map(|row| row.into_new_visitor(now))
            .collect::<RepoResult<Vec<NewVisitor>>>()?;

        self.target.insert_batch(&visitors).await
    }
}
