//! Geolocation enrichment.
//!
//! # Data Flow
//! ```text
//! peer IP
//!     → single GET {endpoint}/{ip} (bounded by client timeout)
//!     → country/city/org mapped into Origin
//!     → any failure or missing field becomes the "N/A" sentinel
//! ```
//!
//! # Design Decisions
//! - `lookup` is infallible: the event is still worth recording without
//!   origin data, so every failure mode collapses to sentinel values
//! - One attempt per connection, no retries
//! - Sentinel is an explicit string, never a missing field, so every
//!   consumer can format the origin unconditionally

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::GeoConfig;

/// Sentinel used when an origin field could not be resolved.
pub const UNAVAILABLE: &str = "N/A";

/// Geographic/organizational origin of a peer. Fields are never absent;
/// unresolved values hold [`UNAVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub country: String,
    pub city: String,
    pub org: String,
}

impl Origin {
    /// Origin with all three fields unresolved.
    pub fn unavailable() -> Self {
        Self {
            country: UNAVAILABLE.to_string(),
            city: UNAVAILABLE.to_string(),
            org: UNAVAILABLE.to_string(),
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {} | Org: {}", self.city, self.country, self.org)
    }
}

/// Wire shape of an ip-api.com-style lookup response. Every field is
/// optional; absent fields map to the sentinel.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    country: Option<String>,
    city: Option<String>,
    org: Option<String>,
}

impl From<LookupResponse> for Origin {
    fn from(res: LookupResponse) -> Self {
        Self {
            country: res.country.unwrap_or_else(|| UNAVAILABLE.to_string()),
            city: res.city.unwrap_or_else(|| UNAVAILABLE.to_string()),
            org: res.org.unwrap_or_else(|| UNAVAILABLE.to_string()),
        }
    }
}

/// Client for the external geolocation collaborator.
#[derive(Debug, Clone)]
pub struct GeoEnricher {
    client: reqwest::Client,
    endpoint: String,
}

impl GeoEnricher {
    /// Build the enricher. The timeout applies to the whole request, so a
    /// stalled collaborator cannot hold a connection task indefinitely.
    pub fn new(config: &GeoConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("HTTP client construction failed");
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the origin of `ip`. Never fails; see module docs.
    pub async fn lookup(&self, ip: &str) -> Origin {
        let url = format!("{}/{}", self.endpoint, ip);
        match self.fetch(&url).await {
            Ok(origin) => origin,
            Err(e) => {
                tracing::debug!(ip = %ip, error = %e, "Geolocation lookup failed");
                Origin::unavailable()
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Origin, reqwest::Error> {
        let res: LookupResponse = self.client.get(url).send().await?.json().await?;
        Ok(res.into())
    }
}
