use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    Json,
};
use chrono::Utc;
use futures::Stream;
use minijinja::context;
use tokio_stream::{wrappers::IntervalStream, StreamExt};

use crate::core::error::Result;
use crate::core::extractor::ClientIp;
use crate::core::flash::FlashSigner;
use crate::core::templates::TemplateEngine;
use crate::features::visitors::dtos::{VisitorCountEvent, VisitorStatsDto};
use crate::features::visitors::services::{ActiveVisitors, VisitorService};
use crate::shared::types::{ApiResponse, Meta};

/// Dependencies shared by the visitor handlers
#[derive(Clone)]
pub struct VisitorState {
    pub service: Arc<VisitorService>,
    pub templates: Arc<TemplateEngine>,
    pub flash: Arc<FlashSigner>,
    pub active: Arc<ActiveVisitors>,
    pub push_interval: Duration,
    pub stats_limit: i64,
}

/// Landing page. Records the visit; a storage failure is logged and the page
/// still renders.
pub async fn index(
    State(state): State<VisitorState>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
) -> Result<Response> {
    state.active.touch(&ip, Utc::now());

    if let Err(e) = state.service.record_visit(&ip).await {
        tracing::error!("Failed to record visit from {}: {}", ip, e);
    }

    let visitor_count = state.service.total_visits().await.unwrap_or_else(|e| {
        tracing::error!("Failed to count visitors: {}", e);
        0
    });

    let flashes = state.flash.read(&headers);
    let html = state.templates.render(
        "index.html",
        context! { visitor_count => visitor_count, flashes => &flashes },
    )?;

    Ok(FlashSigner::consume(Html(html).into_response(), &flashes))
}

/// Recent visitors and per-country counts
pub async fn visitor_stats(
    State(state): State<VisitorState>,
    headers: HeaderMap,
) -> Result<Response> {
    let stats = state.service.stats(state.stats_limit).await?;
    let flashes = state.flash.read(&headers);
    let html = state.templates.render(
        "visitor_stats.html",
        context! { stats => &stats, flashes => &flashes },
    )?;

    Ok(FlashSigner::consume(Html(html).into_response(), &flashes))
}

/// Visitor statistics
///
/// Total visits, visits per country (missing country reported as "Unknown")
/// and the most recent visits, newest first.
#[utoipa::path(
    get,
    path = "/api/visitor-stats",
    responses(
        (status = 200, description = "Visitor statistics", body = ApiResponse<VisitorStatsDto>),
        (status = 500, description = "Database error")
    ),
    tag = "visitors"
)]
pub async fn visitor_stats_json(
    State(state): State<VisitorState>,
) -> Result<Json<ApiResponse<VisitorStatsDto>>> {
    let stats = state.service.stats(state.stats_limit).await?;
    let total = stats.total_visits;

    Ok(Json(ApiResponse::success(
        Some(stats),
        None,
        Some(Meta { total }),
    )))
}

/// Live count of active visitors
///
/// Server-sent events; one `{"count": N}` event right away and then on every
/// push interval. Each tick also marks the connected client as active.
#[utoipa::path(
    get,
    path = "/visitor-count",
    responses(
        (status = 200, description = "Event stream of VisitorCountEvent payloads", body = VisitorCountEvent, content_type = "text/event-stream")
    ),
    tag = "visitors"
)]
pub async fn visitor_count_stream(
    State(state): State<VisitorState>,
    ClientIp(ip): ClientIp,
) -> Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>> {
    let active = state.active.clone();
    tracing::debug!("Visitor count stream opened for {}", ip);

    let stream =
        IntervalStream::new(tokio::time::interval(state.push_interval)).map(move |_| {
            let now = Utc::now();
            active.touch(&ip, now);
            let payload = VisitorCountEvent {
                count: active.active_count(now),
            };
            Event::default().json_data(payload)
        });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
