use async_trait::async_trait;

use crate::core::database::{with_pool, DbPool};
use crate::core::error::{RepoResult, StorageError};
use crate::features::contact::models::{ContactSubmission, NewContact};
use crate::features::contact::repositories::{ContactFilter, ContactRepository};
use crate::shared::types::SortOrder;

const INSERT_CONTACT: &str = r#"
    INSERT INTO contact_submission
        (name, email, message, submission_time, ip_address, country, city, region)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    RETURNING id
"#;

pub struct SqlContactRepository {
    pool: DbPool,
}

impl SqlContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlContactRepository {
    async fn insert(&self, contact: &NewContact) -> RepoResult<i64> {
        let id: i64 = with_pool!(&self.pool, pool => {
            sqlx::query_scalar::<_, i64>(INSERT_CONTACT)
                .bind(contact.name.as_str())
                .bind(contact.email.as_str())
                .bind(contact.message.as_str())
                .bind(contact.submission_time)
                .bind(contact.ip_address.as_deref())
                .bind(contact.country.as_deref())
                .bind(contact.city.as_deref())
                .bind(contact.region.as_deref())
                .fetch_one(pool)
                .await
        })
        .map_err(|e| {
            tracing::error!("Failed to insert contact submission: {:?}", e);
            StorageError::Database(e)
        })?;

        Ok(id)
    }

    async fn insert_batch(&self, contacts: &[NewContact]) -> RepoResult<u64> {
        with_pool!(&self.pool, pool => {
            let mut tx = pool.begin().await?;
            for contact in contacts {
                sqlx::query(INSERT_CONTACT)
                    .bind(contact.name.as_str())
                    .bind(contact.email.as_str())
                    .bind(contact.message.as_str())
                    .bind(contact.submission_time)
                    .bind(contact.ip_address.as_deref())
                    .bind(contact.country.as_deref())
                    .bind(contact.city.as_deref())
                    .bind(contact.region.as_deref())
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;
        });

        Ok(contacts.len() as u64)
    }

    async fn list(
        &self,
        filter: &ContactFilter,
        order: SortOrder,
    ) -> RepoResult<Vec<ContactSubmission>> {
        let sql = format!(
            r#"
            SELECT id, name, email, message, submission_time, ip_address, country, city, region
            FROM contact_submission
            WHERE ($1 IS NULL OR email = $1)
              AND ($2 IS NULL OR submission_time >= $2)
            ORDER BY submission_time {dir}, id {dir}
            LIMIT $3
            "#,
            dir = order.sql_direction()
        );

        let contacts = with_pool!(&self.pool, pool => {
            sqlx::query_as::<_, ContactSubmission>(&sql)
                .bind(filter.email.as_deref())
                .bind(filter.since)
                .bind(filter.limit.unwrap_or(i64::MAX))
                .fetch_all(pool)
                .await
        })
        .map_err(|e| {
            tracing::error!("Failed to list contact submissions: {:?}", e);
            StorageError::Database(e)
        })?;

        Ok(contacts)
    }

    async fn count(&self) -> RepoResult<i64> {
        let count: i64 = with_pool!(&self.pool, pool => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_submission")
                .fetch_one(pool)
                .await
        })
        .map_err(|e| {
            tracing::error!("Failed to count contact submissions: {:?}", e);
            StorageError::Database(e)
        })?;

        Ok(count)
    }
}
