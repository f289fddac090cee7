use std::sync::Arc;

use crate::core::error::Result;
use crate::features::geolocation::GeolocationService;
use crate::features::visitors::dtos::VisitorStatsDto;
use crate::features::visitors::models::NewVisitor;
use crate::features::visitors::repositories::{VisitorFilter, VisitorRepository};
use crate::shared::types::SortOrder;

/// Service for recording page views and summarising them
pub struct VisitorService {
    repository: Arc<dyn VisitorRepository>,
    geolocation: Arc<GeolocationService>,
}

impl VisitorService {
    pub fn new(repository: Arc<dyn VisitorRepository>, geolocation: Arc<GeolocationService>) -> Self {
        Self {
            repository,
            geolocation,
        }
    }

    /// Store one visit from `ip`, enriched with its location when the lookup succeeds
    pub async fn record_visit(&self, ip: &str) -> Result<i64> {
        let location = self.geolocation.lookup(ip).await;
        let visitor = NewVisitor::new(ip).with_location(location);

        let id = self.repository.insert(&visitor).await?;

        tracing::info!(
            "Visitor recorded: id={}, ip={}, country={:?}",
            id,
            visitor.ip_address,
            visitor.country
        );

        Ok(id)
    }

    pub async fn total_visits(&self) -> Result<i64> {
        Ok(self.repository.count().await?)
    }

    /// Totals, per-country counts and the `limit` most recent visits
    pub async fn stats(&self, limit: i64) -> Result<VisitorStatsDto> {
        let total_visits = self.repository.count().await?;
        let by_country = self.repository.count_by_country().await?;
        let recent = self
            .repository
            .list(
                &VisitorFilter {
                    limit: Some(limit),
                    ..Default::default()
                },
                SortOrder::NewestFirst,
            )
            .await?;

        Ok(VisitorStatsDto {
            total_visits,
            by_country,
            recent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::visitors::repositories::SqlVisitorRepository;
    use crate::shared::test_helpers::{memory_pool, offline_geolocation, spawn_geolocation_stub};
    use crate::core::config::GeolocationConfig;
    use axum::http::StatusCode;
    use serde_json::json;

    async fn service_with(geolocation: GeolocationService) -> VisitorService {
        let repository = Arc::new(SqlVisitorRepository::new(memory_pool().await));
        VisitorService::new(repository, Arc::new(geolocation))
    }

    #[tokio::test]
    async fn test_record_visit_without_geolocation() {
        let service = service_with(offline_geolocation()).await;

        service.record_visit("203.0.113.5").await.unwrap();
        let stats = service.stats(10).await.unwrap();

        assert_eq!(stats.total_visits, 1);
        assert_eq!(stats.recent[0].ip_address, "203.0.113.5");
        assert_eq!(stats.recent[0].country, None);
        assert_eq!(stats.by_country[0].country, "Unknown");
    }

    #[tokio::test]
    async fn test_record_visit_with_location() {
        let url = spawn_geolocation_stub(
            StatusCode::OK,
            json!({ "status": "success", "country": "Peru", "city": "Lima", "regionName": "Lima" }),
        )
        .await;
        let geolocation = GeolocationService::new(&GeolocationConfig {
            base_url: url,
            timeout: std::time::Duration::from_secs(5),
        })
        .unwrap();
        let service = service_with(geolocation).await;

        service.record_visit("198.51.100.7").await.unwrap();
        service.record_visit("198.51.100.7").await.unwrap();
        let stats = service.stats(1).await.unwrap();

        assert_eq!(stats.total_visits, 2);
        assert_eq!(stats.recent.len(), 1);
        assert_eq!(stats.recent[0].city.as_deref(), Some("Lima"));
        assert_eq!(stats.by_country[0].country, "Peru");
        assert_eq!(stats.by_country[0].visits, 2);
    }
}
