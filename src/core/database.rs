use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};

use crate::core::config::{DatabaseConfig, DatabaseTarget};
use crate::core::error::RepoResult;

static POSTGRES_MIGRATOR: Migrator = sqlx::migrate!("./migrations/postgres");
static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");

/// Connection pool for whichever backend the primary store runs on
#[derive(Debug, Clone)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// Run the same query code against either backend.
///
/// The body is expanded once per arm, so `$p` is a `&PgPool` in one and a
/// `&SqlitePool` in the other and sqlx infers the database from it.
macro_rules! with_pool {
    ($pool:expr, $p:ident => $body:expr) => {
        match $pool {
            $crate::core::database::DbPool::Postgres($p) => $body,
            $crate::core::database::DbPool::Sqlite($p) => $body,
        }
    };
}
pub(crate) use with_pool;

impl DbPool {
    pub fn backend_name(&self) -> &'static str {
        match self {
            DbPool::Postgres(_) => "postgres",
            DbPool::Sqlite(_) => "sqlite",
        }
    }

    pub async fn close(&self) {
        with_pool!(self, pool => pool.close().await)
    }
}

pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    match &config.target {
        DatabaseTarget::Postgres(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
                .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
                .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
                .connect(url)
                .await?;
            Ok(DbPool::Postgres(pool))
        }
        DatabaseTarget::Sqlite(url) => {
            let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

            // Create parent directory if it doesn't exist
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            let pool = SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
                .connect_with(options)
                .await?;
            Ok(DbPool::Sqlite(pool))
        }
    }
}

/// Apply the embedded schema for the pool's backend (idempotent)
pub async fn run_migrations(pool: &DbPool) -> RepoResult<()> {
    match pool {
        DbPool::Postgres(pool) => POSTGRES_MIGRATOR.run(pool).await?,
        DbPool::Sqlite(pool) => SQLITE_MIGRATOR.run(pool).await?,
    }
    Ok(())
}
