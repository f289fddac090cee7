/// Outcome of one migration run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Rows in the legacy table when the run started
    pub source_rows: i64,
    pub migrated: u64,
    pub pages_committed: u64,
    pub pages_failed: u64,
}
