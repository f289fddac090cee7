use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::error::RepoResult;
use crate::features::contact::models::NewContact;
use crate::features::contact::ContactRepository;
use crate::features::migration::models::LegacyContactRow;
use crate::features::migration::repositories::{LegacyStore, LegacyTable};
use crate::features::migration::services::MigrationJob;

/// Copies legacy `contact_submission` rows into the primary store
pub struct ContactMigration {
    source: Arc<LegacyStore>,
    target: Arc<dyn ContactRepository>,
}

impl ContactMigration {
    pub fn new(source: Arc<LegacyStore>, target: Arc<dyn ContactRepository>) -> Self {
        Self { source, target }
    }
}

#[async_trait]
impl MigrationJob for ContactMigration {
    type Row = LegacyContactRow;

    fn name(&self) -> &'static str {
        LegacyTable::ContactSubmission.name()
    }

    async fn source_exists(&self) -> RepoResult<bool> {
        self.source.table_exists(LegacyTable::ContactSubmission).await
    }

    async fn source_count(&self) -> RepoResult<i64> {
        self.source.count(LegacyTable::ContactSubmission).await
    }

    async fn fetch_page(&self, offset: i64, limit: i64) -> RepoResult<Vec<LegacyContactRow>> {
        self.source.fetch_contacts(offset, limit).await
    }

    async fn commit_page(&self, rows: Vec<LegacyContactRow>) -> RepoResult<u64> {
        let now = Utc::now();
        let contacts = rows
            .into_iter()
            .map(|row| row.into_new_contact(now))
            .collect::<RepoResult<Vec<NewContact>>>()?;

        self.target.insert_batch(&contacts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::contact::repositories::{ContactFilter, SqlContactRepository};
    use crate::features::migration::services::BatchMigrator;
    use crate::shared::test_helpers::memory_pool;
    use crate::shared::types::SortOrder;
    use chrono::TimeZone;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::lorem::en::Sentence;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_contacts_copied_in_pages() {
        let legacy = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            r#"
            CREATE TABLE contact_submission (
                id INTEGER PRIMARY KEY,
                name VARCHAR(100),
                email VARCHAR(120),
                message TEXT,
                submission_time DATETIME,
                ip_address VARCHAR(50),
                country VARCHAR(100),
                city VARCHAR(100),
                region VARCHAR(100)
            )
            "#,
        )
        .execute(&legacy)
        .await
        .unwrap();

        let mut expected = Vec::new();
        for day in 1..=12u32 {
            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            let message: String = Sentence(4..10).fake();
            sqlx::query(
                "INSERT INTO contact_submission (name, email, message, submission_time, ip_address) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&name)
            .bind(&email)
            .bind(&message)
            .bind(format!("2024-02-{:02}T08:30:00Z", day))
            .bind("192.0.2.1")
            .execute(&legacy)
            .await
            .unwrap();
            expected.push((name, email, message, day));
        }

        let target = Arc::new(SqlContactRepository::new(memory_pool().await));
        let job = ContactMigration::new(Arc::new(LegacyStore::from_pool(legacy)), target.clone());

        let report = BatchMigrator::new(5, 0, 1_000_000, std::time::Duration::ZERO)
            .run(&job)
            .await;

        assert_eq!(report.migrated, 12);
        assert_eq!(report.pages_committed, 3);

        let stored = target
            .list(&ContactFilter::default(), SortOrder::OldestFirst)
            .await
            .unwrap();
        assert_eq!(stored.len(), 12);
        for (row, (name, email, message, day)) in stored.iter().zip(expected) {
            assert_eq!(row.name, name);
            assert_eq!(row.email, email);
            assert_eq!(row.message, message);
            assert_eq!(
                row.submission_time,
                Utc.with_ymd_and_hms(2024, 2, day, 8, 30, 0).unwrap()
            );
            assert_eq!(row.ip_address.as_deref(), Some("192.0.2.1"));
            assert_eq!(row.country, None);
        }
    }
}
