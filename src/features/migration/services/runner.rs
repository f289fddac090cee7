use std::time::Duration;

use async_trait::async_trait;

use crate::core::error::RepoResult;
use crate::features::migration::models::MigrationReport;

/// One table's copy from the legacy store into the primary store
#[async_trait]
pub trait MigrationJob: Send + Sync {
    type Row: Send;

    /// Table name, for logging
    fn name(&self) -> &'static str;

    async fn source_exists(&self) -> RepoResult<bool>;

    async fn source_count(&self) -> RepoResult<i64>;

    async fn fetch_page(&self, offset: i64, limit: i64) -> RepoResult<Vec<Self::Row>>;

    /// Convert and insert a page in one transaction, returning rows written.
    /// On error nothing from the page is kept.
    async fn commit_page(&self, rows: Vec<Self::Row>) -> RepoResult<u64>;
}

/// Offset-paged copy over `[start, end)` with a pause between pages
#[derive(Debug, Clone)]
pub struct BatchMigrator {
    page_size: i64,
    start: i64,
    end: i64,
    pause: Duration,
}

impl BatchMigrator {
    pub fn new(page_size: i64, start: i64, end: i64, pause: Duration) -> Self {
        Self {
            page_size: page_size.max(1),
            start: start.max(0),
            end,
            pause,
        }
    }

    /// Run `job` to completion. Errors are logged, never returned: a failed
    /// page is skipped and a failed read ends the run.
    pub async fn run<J: MigrationJob>(&self, job: &J) -> MigrationReport {
        let mut report = MigrationReport::default();
        let table = job.name();

        match job.source_exists().await {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!("No {} table found in legacy store. Nothing to migrate.", table);
                return report;
            }
            Err(e) => {
                tracing::error!("Failed to inspect legacy {} table: {}", table, e);
                return report;
            }
        }

        report.source_rows = match job.source_count().await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("Failed to count legacy {} rows: {}", table, e);
                return report;
            }
        };

        if report.source_rows == 0 {
            tracing::info!("No {} rows in legacy store. Nothing to migrate.", table);
            return report;
        }

        tracing::info!(
            "Found {} {} rows in legacy store, migrating offsets {}-{}",
            report.source_rows,
            table,
            self.start,
            self.end
        );

        let mut offset = self.start;
        while offset < self.end {
            let limit = self.page_size.min(self.end - offset);

            let rows = match job.fetch_page(offset, limit).await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::error!("Failed to read {} page at offset {}: {}", table, offset, e);
                    break;
                }
            };

            if rows.is_empty() {
                break;
            }

            let fetched = rows.len() as i64;
            match job.commit_page(rows).await {
                Ok(written) => {
                    report.migrated += written;
                    report.pages_committed += 1;
                    tracing::info!(
                        "Migrated page of {} {} rows. Total: {}/{} (offsets {}-{})",
                        written,
                        table,
                        report.migrated,
                        report.source_rows,
                        offset,
                        offset + fetched
                    );
                }
                Err(e) => {
                    report.pages_failed += 1;
                    tracing::error!(
                        "Error committing {} page at offset {}, rolled back: {}",
                        table,
                        offset,
                        e
                    );
                }
            }

            offset += limit;

            if offset < self.end && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
        }

        tracing::info!(
            source_rows = report.source_rows,
            migrated = report.migrated,
            pages_committed = report.pages_committed,
            pages_failed = report.pages_failed,
            "{} migration finished",
            table
        );

        report
    }
}
