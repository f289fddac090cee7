use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::visitors::models::{CountryCount, Visitor};

/// Aggregate view backing the stats page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisitorStatsDto {
    pub total_visits: i64,
    pub by_country: Vec<CountryCount>,
    /// Most recent first
    pub recent: Vec<Visitor>,
}

/// Payload pushed on `/visitor-count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VisitorCountEvent {
    pub count: usize,
}
