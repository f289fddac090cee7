use axum::{routing::post, Router};

use crate::features::contact::handlers::{self, ContactState};

/// Create routes for the contact feature
pub fn routes(state: ContactState) -> Router {
    Router::new()
        .route("/contact", post(handlers::submit_contact))
        .with_state(state)
}
