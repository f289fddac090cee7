use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::{Html, IntoResponse, Response},
};
use minijinja::context;

use crate::core::error::{AppError, Result};
use crate::core::flash::FlashSigner;
use crate::core::templates::TemplateEngine;

#[derive(Clone)]
pub struct PageState {
    pub templates: Arc<TemplateEngine>,
    pub flash: Arc<FlashSigner>,
}

pub async fn flash_news(State(state): State<PageState>, headers: HeaderMap) -> Result<Response> {
    let flashes = state.flash.read(&headers);
    let html = state
        .templates
        .render("flash_news.html", context! { flashes => &flashes })?;

    Ok(FlashSigner::consume(Html(html).into_response(), &flashes))
}

/// Liveness probe
///
/// Does not touch the database.
#[utoipa::path(
    get,
    path = "/ping",
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain")
    ),
    tag = "health"
)]
pub async fn ping() -> &'static str {
    "pong"
}

/// Fallback for unmatched paths
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::pages::routes::routes;
    use crate::shared::test_helpers::{body_string, test_flash_signer, test_templates};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    fn app() -> Router {
        routes(PageState {
            templates: Arc::new(test_templates()),
            flash: Arc::new(test_flash_signer()),
        })
    }

    #[tokio::test]
    async fn test_ping_returns_pong() {
        let response = app()
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "pong");
    }

    #[tokio::test]
    async fn test_flash_news_renders() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/flash-news")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Flash News"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_404() {
        let response = app()
            .fallback(not_found)
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "No route for /nope");
    }
}
