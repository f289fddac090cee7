use axum::{routing::get, Router};

use crate::features::pages::handlers::{self, PageState};

/// Create routes for static pages and the health check
pub fn routes(state: PageState) -> Router {
    Router::new()
        .route("/flash-news", get(handlers::flash_news))
        .route("/ping", get(handlers::ping))
        .with_state(state)
}
