//! Public-IP discovery and geolocation.
//!
//! The two lookups are exposed separately because the second needs the first's
//! answer; callers run them back to back.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct IpEcho {
    ip: String,
}

/// Raw geolocation payload. Only the fields we forward are kept; any of them may be
/// missing upstream, in which case they stay `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeoPayload {
    pub city: Value,
    pub region: Value,
    pub country_name: Value,
    pub latitude: Value,
    pub longitude: Value,
    pub timezone: Value,
    pub org: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub city: Value,
    pub region: Value,
    pub country: Value,
    pub latitude: Value,
    pub longitude: Value,
    pub timezone: Value,
    pub org: Value,
}

impl From<GeoPayload> for Location {
    fn from(geo: GeoPayload) -> Self {
        Self {
            city: geo.city,
            region: geo.region,
            country: geo.country_name,
            latitude: geo.latitude,
            longitude: geo.longitude,
            timezone: geo.timezone,
            org: geo.org,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpLookupResult {
    pub ip: String,
    pub location: Location,
}

#[derive(Clone)]
pub struct GeoClient {
    http: Client,
    ip_echo_url: String,
    geo_base_url: String,
}

impl GeoClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            ip_echo_url: config.ip_echo_url.clone(),
            geo_base_url: config.geo_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn location_url(&self, ip: &str) -> String {
        format!("{}/{}/json/", self.geo_base_url, urlencoding::encode(ip))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Ask the echo service which address our requests come from.
    pub async fn public_ip(&self) -> Result<String> {
        let echo: IpEcho = self.get_json(&self.ip_echo_url).await?;
        Ok(echo.ip)
    }

    /// Geolocate `ip`.
    pub async fn locate(&self, ip: &str) -> Result<Location> {
        let geo: GeoPayload = self.get_json(&self.location_url(ip)).await?;
        Ok(geo.into())
    }
}
