use axum::{routing::get, Router};

use crate::features::visitors::handlers::{self, VisitorState};

/// Create routes for the visitors feature
pub fn routes(state: VisitorState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/visitor-stats", get(handlers::visitor_stats))
        .route("/api/visitor-stats", get(handlers::visitor_stats_json))
        .route("/visitor-count", get(handlers::visitor_count_stream))
        .with_state(state)
}
