use reqwest::{header, Client};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};

/// Version pin the places provider expects on every call.
pub const PLACES_API_VERSION: &str = "2025-06-17";

/// Thin client for place search and photo lookups.
#[derive(Clone)]
pub struct PlacesClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.places_base_url.trim_end_matches('/').to_string(),
            api_key: config.places_api_key.clone(),
        }
    }

    fn headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Places-Api-Version",
            header::HeaderValue::from_static(PLACES_API_VERSION),
        );
        headers
    }

    fn photos_url(&self, fsq_id: &str) -> String {
        format!("{}/places/{}/photos", self.base_url, urlencoding::encode(fsq_id))
    }

    /// Search places near `ll` ("lat,lng"). The provider's JSON is returned as-is,
    /// whatever status it came with.
    pub async fn search(&self, query: &str, ll: &str) -> Result<Value> {
        let url = format!("{}/places/search", self.base_url);
        debug!("Places search: query='{}' ll='{}'", query, ll);

        let response = self
            .http
            .get(&url)
            .headers(Self::headers())
            .bearer_auth(&self.api_key)
            .query(&[("query", query), ("ll", ll)])
            .send()
            .await?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the photo list for one place.
    pub async fn photos(&self, fsq_id: &str) -> Result<Value> {
        let response = self
            .http
            .get(self.photos_url(fsq_id))
            .headers(Self::headers())
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
