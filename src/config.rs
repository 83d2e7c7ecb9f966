use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;

use crate::error::{AppError, Result};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub unsplash_access_key: String,
    pub unsplash_base_url: String,
    pub allowed_origin: HeaderValue,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let gemini_api_key = env::var("GEMINI_API_KEY")?;
        let unsplash_access_key = env::var("UNSPLASH_ACCESS_KEY")?;

        let host = env_or("HOST", "127.0.0.1");
        let port = env_or("PORT", "8000");
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let origin = env_or("ALLOWED_ORIGIN", "http://localhost:3000");
        let allowed_origin = HeaderValue::from_str(&origin)
            .map_err(|e| AppError::ConfigError(format!("Invalid allowed origin: {}", e)))?;

        let timeout_secs = env_or("UPSTREAM_TIMEOUT_SECS", "60")
            .parse::<u64>()
            .map_err(|e| AppError::ConfigError(format!("Invalid upstream timeout: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            gemini_api_key,
            gemini_model: env_or("GEMINI_MODEL", "gemini-pro"),
            gemini_base_url: trim_base(env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL)),
            unsplash_access_key,
            unsplash_base_url: trim_base(env_or("UNSPLASH_BASE_URL", DEFAULT_UNSPLASH_BASE_URL)),
            allowed_origin,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Builds a config for the given keys with every optional setting at its default.
    pub fn with_keys(gemini_api_key: impl Into<String>, unsplash_access_key: impl Into<String>) -> Self {
        Config {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            gemini_api_key: gemini_api_key.into(),
            gemini_model: "gemini-pro".to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            unsplash_access_key: unsplash_access_key.into(),
            unsplash_base_url: DEFAULT_UNSPLASH_BASE_URL.to_string(),
            allowed_origin: HeaderValue::from_static("http://localhost:3000"),
            upstream_timeout: Duration::from_secs(60),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_dropped_from_base_urls() {
        assert_eq!(trim_base("http://localhost:9000/".to_string()), "http://localhost:9000");
        assert_eq!(trim_base("http://localhost:9000".to_string()), "http://localhost:9000");
    }

    #[test]
    fn defaults_point_at_public_apis() {
        let config = Config::with_keys("g", "u");
        assert_eq!(config.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.unsplash_base_url, DEFAULT_UNSPLASH_BASE_URL);
        assert_eq!(config.server_addr.port(), 8000);
    }
}
