//! Environment-driven configuration.

use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Please define the STORE_PATH environment variable")]
    MissingStorePath,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Filesystem path of the document store. Required; startup fails
    /// without it since no data route can serve anything.
    pub store_path: String,
    pub bind_addr: String,
    /// Deployment environment name, echoed by `/api/health`.
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_path = env::var("STORE_PATH").map_err(|_| ConfigError::MissingStorePath)?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        Ok(Self {
            store_path,
            bind_addr,
            app_env,
        })
    }
}
