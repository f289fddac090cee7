use async_trait::async_trait;

use crate::core::database::{with_pool, DbPool};
use crate::core::error::{RepoResult, StorageError};
use crate::features::visitors::models::{CountryCount, NewVisitor, Visitor};
use crate::features::visitors::repositories::{VisitorFilter, VisitorRepository};
use crate::shared::types::SortOrder;

const INSERT_VISITOR: &str = r#"
    INSERT INTO visitor (ip_address, visit_time, country, city, region)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id
"#;

/// Visitor storage on Postgres or SQLite; the SQL is shared by both backends
pub struct SqlVisitorRepository {
    pool: DbPool,
}

impl SqlVisitorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitorRepository for SqlVisitorRepository {
    async fn insert(&self, visitor: &NewVisitor) -> RepoResult<i64> {
        let id: i64 = with_pool!(&self.pool, pool => {
            sqlx::query_scalar::<_, i64>(INSERT_VISITOR)
                .bind(visitor.ip_address.as_str())
                .bind(visitor.visit_time)
                .bind(visitor.country.as_deref())
                .bind(visitor.city.as_deref())
                .bind(visitor.region.as_deref())
                .fetch_one(pool)
                .await
        })
        .map_err(|e| {
            tracing::error!("Failed to insert visitor: {:?}", e);
            StorageError::Database(e)
        })?;

        Ok(id)
    }

    async fn insert_batch(&self, visitors: &[NewVisitor]) -> RepoResult<u64> {
        with_pool!(&self.pool, pool => {
            let mut tx = pool.begin().await?;
            for visitor in visitors {
                sqlx::query(INSERT_VISITOR)
                    .bind(visitor.ip_address.as_str())
                    .bind(visitor.visit_time)
                    .bind(visitor.country.as_deref())
                    .bind(visitor.city.as_deref())
                    .bind(visitor.region.as_deref())
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;
        });

        Ok(visitors.len() as u64)
    }

    async fn list(&self, filter: &VisitorFilter, order: SortOrder) -> RepoResult<Vec<Visitor>> {
        let sql = format!(
            r#"
            SELECT id, ip_address, visit_time, country, city, region
            FROM visitor
            WHERE ($1 IS NULL OR country = $1)
              AND ($2 IS NULL OR visit_time >= $2)
            ORDER BY visit_time {dir}, id {dir}
            LIMIT $3
            "#,
            dir = order.sql_direction()
        );

        let visitors = with_pool!(&self.pool, pool => {
            sqlx::query_as::<_, Visitor>(&sql)
                .bind(filter.country.as_deref())
                .bind(filter.since)
                .bind(filter.limit.unwrap_or(i64::MAX))
                .fetch_all(pool)
                .await
        })
        .map_err(|e| {
            tracing::error!("Failed to list visitors: {:?}", e);
            StorageError::Database(e)
        })?;

        Ok(visitors)
    }

    async fn count(&self) -> RepoResult<i64> {
        let count: i64 = with_pool!(&self.pool, pool => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visitor")
                .fetch_one(pool)
                .await
        })
        .map_err(|e| {
            tracing::error!("Failed to count visitors: {:?}", e);
            StorageError::Database(e)
        })?;

        Ok(count)
    }

    async fn count_by_country(&self) -> RepoResult<Vec<CountryCount>> {
        let rows = with_pool!(&self.pool, pool => {
            sqlx::query_as::<_, CountryCount>(
                r#"
                SELECT COALESCE(country, 'Unknown') AS country, COUNT(*) AS visits
                FROM visitor
                GROUP BY COALESCE(country, 'Unknown')
                ORDER BY visits DESC, country ASC
                "#,
            )
            .fetch_all(pool)
            .await
        })
        .map_err(|e| {
            tracing::error!("Failed to count visitors by country: {:?}", e);
            StorageError::Database(e)
        })?;

        Ok(rows)
    }
}
