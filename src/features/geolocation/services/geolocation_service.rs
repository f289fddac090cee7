use serde::Deserialize;

use crate::core::config::GeolocationConfig;
use crate::core::extractor::UNKNOWN_IP;
use crate::features::geolocation::models::LocationInfo;
use crate::shared::constants::UNKNOWN_LOCATION;

/// ip-api.com style response body
#[derive(Debug, Deserialize)]
pub struct IpApiResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "regionName")]
    pub region_name: Option<String>,
}

impl IpApiResponse {
    /// Location for a successful lookup, each missing field defaulting to "Unknown"
    pub fn into_location(self) -> Option<LocationInfo> {
        if self.status.as_deref() != Some("success") {
            tracing::debug!(
                "Geolocation lookup unsuccessful: status={:?}, message={:?}",
                self.status,
                self.message
            );
            return None;
        }

        let or_unknown = |v: Option<String>| {
            v.filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
        };

        Some(LocationInfo {
            country: or_unknown(self.country),
            city: or_unknown(self.city),
            region: or_unknown(self.region_name),
        })
    }
}

/// Service for resolving client IPs to a coarse location
pub struct GeolocationService {
    client: reqwest::Client,
    base_url: String,
}

impl GeolocationService {
    pub fn new(config: &GeolocationConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent("MarketingSite/1.0 (visitor-analytics)")
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up `ip`; `None` on timeout, transport error, non-2xx or an unsuccessful body
    pub async fn lookup(&self, ip: &str) -> Option<LocationInfo> {
        if ip.is_empty() || ip == UNKNOWN_IP {
            return None;
        }

        match self.execute_request(ip).await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!("Geolocation lookup for {} failed: {}", ip, e);
                None
            }
        }
    }

    async fn execute_request(&self, ip: &str) -> Result<Option<LocationInfo>, reqwest::Error> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(ip));
        tracing::debug!("Geolocation lookup: {} -> {}", ip, url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            tracing::warn!("Geolocation service returned status: {}", response.status());
            return Ok(None);
        }

        let body: IpApiResponse = response.json().await?;
        Ok(body.into_location())
    }
}
