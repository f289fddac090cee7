//! Copy every legacy table into the primary store, full range, in pages of
//! 50 visitors and 20 contacts with no pause.

use marketing_site::core::telemetry;
use marketing_site::features::migration::cli::{self, OffsetRange, Pacing};
use marketing_site::features::migration::LegacyTable;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    cli::run(
        &[LegacyTable::Visitor, LegacyTable::ContactSubmission],
        OffsetRange::default(),
        Pacing::FullCopy,
    )
    .await;
}
