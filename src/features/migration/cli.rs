//! Entry point shared by the `migrate-*` binaries.

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::{Config, MigrationConfig};
use crate::core::database;
use crate::features::contact::SqlContactRepository;
use crate::features::migration::models::MigrationReport;
use crate::features::migration::repositories::{LegacyStore, LegacyTable};
use crate::features::migration::services::{BatchMigrator, ContactMigration, VisitorMigration};
use crate::features::visitors::SqlVisitorRepository;
use crate::shared::constants::{
    DEFAULT_MIGRATION_END, DEFAULT_MIGRATION_START, FULL_COPY_CONTACT_PAGE_SIZE,
    FULL_COPY_VISITOR_PAGE_SIZE,
};

/// Offsets `[start, end)` taken from positional arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    pub start: i64,
    pub end: i64,
}

impl Default for OffsetRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_MIGRATION_START,
            end: DEFAULT_MIGRATION_END,
        }
    }
}

/// How a run pages through the legacy tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Configured page sizes with the configured pause between pages
    Throttled,
    /// Larger fixed pages back to back, for the all-tables copy
    FullCopy,
}

impl Pacing {
    /// Page size and inter-page pause for `table`
    pub fn plan(self, table: LegacyTable, config: &MigrationConfig) -> (i64, Duration) {
        match self {
            Pacing::Throttled => {
                let page_size = match table {
                    LegacyTable::Visitor => config.visitor_page_size,
                    LegacyTable::ContactSubmission => config.contact_page_size,
                };
                (page_size, config.pause)
            }
            Pacing::FullCopy => {
                let page_size = match table {
                    LegacyTable::Visitor => FULL_COPY_VISITOR_PAGE_SIZE,
                    LegacyTable::ContactSubmission => FULL_COPY_CONTACT_PAGE_SIZE,
                };
                (page_size, Duration::ZERO)
            }
        }
    }
}

fn parse_offset(arg: Option<&String>, name: &str, default: i64) -> i64 {
    match arg {
        None => default,
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(value) if value >= 0 => value,
            _ => {
                tracing::warn!("Ignoring invalid {} offset {:?}, using {}", name, raw, default);
                default
            }
        },
    }
}

/// Read `[start] [end]` from arguments following the program name
pub fn parse_range(args: &[String]) -> OffsetRange {
    let defaults = OffsetRange::default();
    OffsetRange {
        start: parse_offset(args.first(), "start", defaults.start),
        end: parse_offset(args.get(1), "end", defaults.end),
    }
}

/// Apply the schema, copy `tables` over `range`, close both stores.
///
/// Failures are logged; the caller exits successfully either way.
pub async fn run(
    tables: &[LegacyTable],
    range: OffsetRange,
    pacing: Pacing,
) -> Vec<MigrationReport> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Vec::new();
        }
    };

    tracing::info!(
        "Starting {:?} migration of {:?} for offsets {}-{} into {}",
        pacing,
        tables,
        range.start,
        range.end,
        config.database.target.redacted()
    );

    let pool = match database::create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to primary store: {}", e);
            return Vec::new();
        }
    };

    if let Err(e) = database::run_migrations(&pool).await {
        tracing::error!("Failed to apply schema to primary store: {}", e);
        pool.close().await;
        return Vec::new();
    }

    let source = match LegacyStore::open(&config.migration.legacy_db_path).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(
                "Failed to open legacy store {}: {}",
                config.migration.legacy_db_path.display(),
                e
            );
            pool.close().await;
            return Vec::new();
        }
    };

    let mut reports = Vec::with_capacity(tables.len());
    for &table in tables {
        let (page_size, pause) = pacing.plan(table, &config.migration);
        let migrator = BatchMigrator::new(page_size, range.start, range.end, pause);
        let report = match table {
            LegacyTable::Visitor => {
                let job = VisitorMigration::new(
                    Arc::clone(&source),
                    Arc::new(SqlVisitorRepository::new(pool.clone())),
                );
                migrator.run(&job).await
            }
            LegacyTable::ContactSubmission => {
                let job = ContactMigration::new(
                    Arc::clone(&source),
                    Arc::new(SqlContactRepository::new(pool.clone())),
                );
                migrator.run(&job).await
            }
        };
        reports.push(report);
    }

    source.close().await;
    pool.close().await;
    tracing::info!("Migration complete for offsets {}-{}", range.start, range.end);

    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn migration_config() -> MigrationConfig {
        MigrationConfig {
            legacy_db_path: "instance/visitors.db".into(),
            pause: Duration::from_millis(500),
            visitor_page_size: 10,
            contact_page_size: 5,
        }
    }

    #[test]
    fn test_throttled_pacing_uses_config() {
        let config = migration_config();
        assert_eq!(
            Pacing::Throttled.plan(LegacyTable::Visitor, &config),
            (10, Duration::from_millis(500))
        );
        assert_eq!(
            Pacing::Throttled.plan(LegacyTable::ContactSubmission, &config),
            (5, Duration::from_millis(500))
        );
    }

    #[test]
    fn test_full_copy_pacing_ignores_config() {
        let config = migration_config();
        assert_eq!(
            Pacing::FullCopy.plan(LegacyTable::Visitor, &config),
            (50, Duration::ZERO)
        );
        assert_eq!(
            Pacing::FullCopy.plan(LegacyTable::ContactSubmission, &config),
            (20, Duration::ZERO)
        );
    }

    #[test]
    fn test_defaults_without_args() {
        assert_eq!(parse_range(&[]), OffsetRange::default());
        assert_eq!(
            parse_range(&[]),
            OffsetRange {
                start: 0,
                end: 1_000_000
            }
        );
    }

    #[test]
    fn test_positional_offsets() {
        assert_eq!(
            parse_range(&args(&["100", "250"])),
            OffsetRange {
                start: 100,
                end: 250
            }
        );
        assert_eq!(parse_range(&args(&["40"])).end, 1_000_000);
    }

    #[test]
    fn test_malformed_args_fall_back() {
        assert_eq!(
            parse_range(&args(&["ten", "-5"])),
            OffsetRange::default()
        );
        assert_eq!(parse_range(&args(&["7", "lots"])).start, 7);
    }
}
