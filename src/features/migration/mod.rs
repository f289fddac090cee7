//! One-shot copy of the legacy SQLite store into the primary store.
//!
//! Rows are read in fixed-size pages ordered by `rowid`. Each page is
//! converted and inserted in a single transaction; a page that fails is
//! rolled back and skipped, and the run carries on with the next one. Runs
//! are not idempotent: migrating the same range twice duplicates rows.

pub mod cli;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::MigrationReport;
pub use repositories::{LegacyStore, LegacyTable};
pub use services::{BatchMigrator, ContactMigration, MigrationJob, VisitorMigration};
