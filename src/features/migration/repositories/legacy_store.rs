use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::core::error::RepoResult;
use crate::features::migration::models::{LegacyContactRow, LegacyVisitorRow};

/// Tables that can be copied out of the legacy store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyTable {
    Visitor,
    ContactSubmission,
}

impl LegacyTable {
    pub fn name(&self) -> &'static str {
        match self {
            LegacyTable::Visitor => "visitor",
            LegacyTable::ContactSubmission => "contact_submission",
        }
    }
}

/// Read-only access to the legacy SQLite file
pub struct LegacyStore {
    pool: SqlitePool,
}

impl LegacyStore {
    pub async fn open(path: &Path) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        tracing::info!("Opened legacy store {}", path.display());
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn table_exists(&self, table: LegacyTable) -> RepoResult<bool> {
        let found: i64 = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = $1",
        )
        .bind(table.name())
        .fetch_one(&self.pool)
        .await?;

        Ok(found > 0)
    }

    pub async fn count(&self, table: LegacyTable) -> RepoResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = sqlx::query_scalar::<_, i64>(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Up to `limit` visitor rows starting at `offset`, in insertion order
    pub async fn fetch_visitors(&self, offset: i64, limit: i64) -> RepoResult<Vec<LegacyVisitorRow>> {
        let rows = sqlx::query_as::<_, LegacyVisitorRow>(
            r#"
            SELECT CAST(ip_address AS TEXT) AS ip_address,
                   CAST(visit_time AS TEXT) AS visit_time,
                   CAST(country AS TEXT) AS country,
                   CAST(city AS TEXT) AS city,
                   CAST(region AS TEXT) AS region
            FROM visitor
            ORDER BY rowid
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn fetch_contacts(&self, offset: i64, limit: i64) -> RepoResult<Vec<LegacyContactRow>> {
        let rows = sqlx::query_as::<_, LegacyContactRow>(
            r#"
            SELECT CAST(name AS TEXT) AS name,
                   CAST(email AS TEXT) AS email,
                   CAST(message AS TEXT) AS message,
                   CAST(submission_time AS TEXT) AS submission_time,
                   CAST(ip_address AS TEXT) AS ip_address,
                   CAST(country AS TEXT) AS country,
                   CAST(city AS TEXT) AS city,
                   CAST(region AS TEXT) AS region
            FROM contact_submission
            ORDER BY rowid
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Legacy store closed");
    }
}
