//! Startup configuration, read once from the environment and handed to every client.

use std::env;

use anyhow::{Context, Result};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_PLACES_BASE_URL: &str = "https://places-api.foursquare.com";
pub const DEFAULT_CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IP_ECHO_URL: &str = "https://api.ipify.org/?format=json";
pub const DEFAULT_GEO_BASE_URL: &str = "https://ipapi.co";

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the places provider
    pub places_api_key: String,
    /// Bearer token for the chat-completion provider
    pub chat_api_key: String,
    pub port: u16,
    pub places_base_url: String,
    pub chat_completions_url: String,
    pub chat_model: String,
    pub ip_echo_url: String,
    pub geo_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            places_api_key: String::new(),
            chat_api_key: String::new(),
            port: DEFAULT_PORT,
            places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
            chat_completions_url: DEFAULT_CHAT_COMPLETIONS_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            ip_echo_url: DEFAULT_IP_ECHO_URL.to_string(),
            geo_base_url: DEFAULT_GEO_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", raw))?,
            None => defaults.port,
        };

        let config = Self {
            places_api_key: get("FOURSQUARE_API_KEY").unwrap_or_default(),
            chat_api_key: get("OPENROUTER_API_KEY").unwrap_or_default(),
            port,
            places_base_url: get("PLACES_BASE_URL").unwrap_or(defaults.places_base_url),
            chat_completions_url: get("CHAT_COMPLETIONS_URL").unwrap_or(defaults.chat_completions_url),
            chat_model: get("CHAT_MODEL").unwrap_or(defaults.chat_model),
            ip_echo_url: get("IP_ECHO_URL").unwrap_or(defaults.ip_echo_url),
            geo_base_url: get("GEO_BASE_URL").unwrap_or(defaults.geo_base_url),
        };

        // Not fatal: requests will fail upstream with an auth error instead.
        if config.places_api_key.is_empty() {
            warn!("FOURSQUARE_API_KEY is not set; places requests will be rejected upstream");
        }
        if config.chat_api_key.is_empty() {
            warn!("OPENROUTER_API_KEY is not set; AI requests will be rejected upstream");
        }

        Ok(config)
    }
}
