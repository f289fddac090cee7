mod legacy_store;

pub use legacy_store::{LegacyStore, LegacyTable};
