mod contact_migration;
mod runner;
pub mod timestamps;
mod visitor_migration;

pub use contact_migration::ContactMigration;
pub use runner::{BatchMigrator, MigrationJob};
pub use visitor_migration::VisitorMigration;
