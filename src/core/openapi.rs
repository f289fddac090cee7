use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::features::geolocation::LocationInfo;
use crate::features::pages::handlers as pages_handlers;
use crate::features::visitors::{
    dtos as visitors_dtos, handlers as visitors_handlers, models as visitors_models,
};
use crate::shared::types::{ApiResponse, Meta};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        // Visitors
        visitors_handlers::visitor_stats_json,
        visitors_handlers::visitor_count_stream,
        // Health
        pages_handlers::ping,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Geolocation
            LocationInfo,
            // Visitors
            visitors_models::Visitor,
            visitors_models::CountryCount,
            visitors_dtos::VisitorStatsDto,
            visitors_dtos::VisitorCountEvent,
            ApiResponse<visitors_dtos::VisitorStatsDto>,
        )
    ),
    tags(
        (name = "visitors", description = "Visitor statistics and live visitor count"),
        (name = "health", description = "Liveness probe"),
    ),
    info(
        title = "Marketing Site API",
        description = "Machine-readable endpoints of the marketing site",
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub fn routes() -> Router {
    let doc = ApiDoc::openapi();
    Router::new().route(OPENAPI_PATH, get(move || async move { Json(doc) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_public_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/visitor-stats"));
        assert!(doc.paths.paths.contains_key("/visitor-count"));
        assert!(doc.paths.paths.contains_key("/ping"));
    }
}
