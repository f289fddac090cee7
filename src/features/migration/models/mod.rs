mod legacy_row;
mod report;

pub use legacy_row::{LegacyContactRow, LegacyVisitorRow};
pub use report::MigrationReport;
