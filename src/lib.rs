pub mod api;
pub mod config;
pub mod error;
pub mod facts;
pub mod gemini;
pub mod unsplash;

use std::sync::Arc;

use config::Config;
use error::{AppError, Result};
use reqwest::Client;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .connect_timeout(config.upstream_timeout.min(std::time::Duration::from_secs(10)))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(AppState {
            config: Arc::new(config),
            http,
        })
    }
}
