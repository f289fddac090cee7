//! Copy legacy visitors into the primary store.
//!
//! Usage: `migrate-visitors [start] [end]`

use marketing_site::core::telemetry;
use marketing_site::features::migration::{cli, LegacyTable};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    cli::run(
        &[LegacyTable::Visitor],
        cli::parse_range(&args),
        cli::Pacing::Throttled,
    )
    .await;
}
