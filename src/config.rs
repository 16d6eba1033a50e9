use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::streaming::ChunkSettings;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment (dev, staging, prod)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// CORS allowed origins
    pub cors_origins: Option<String>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Characters per stream chunk
    #[serde(default = "default_stream_chunk_size")]
    pub stream_chunk_size: usize,

    /// Milliseconds between stream chunks
    #[serde(default = "default_stream_tick_ms")]
    pub stream_tick_ms: u64,

    /// Seconds a session may sit idle before eviction
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

impl Config {
    /// Load configuration from environment variables or app.env file
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load from app.env file first
        if std::path::Path::new("app.env").exists() {
            dotenvy::from_filename("app.env").ok();
        } else {
            // Fallback to .env file
            dotenvy::dotenv().ok();
        }

        // Load from environment variables using envy
        match envy::from_env::<Config>() {
            Ok(config) => {
                info!("Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                Err(ConfigError::EnvError(e))
            }
        }
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Cadence and chunk sizing for campaign streams
    pub fn chunk_settings(&self) -> ChunkSettings {
        ChunkSettings {
            chunk_size: self.stream_chunk_size,
            tick: Duration::from_millis(self.stream_tick_ms),
        }
    }

    /// Idle TTL after which sessions are evicted
    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            cors_origins: None,
            log_level: default_log_level(),
            stream_chunk_size: default_stream_chunk_size(),
            stream_tick_ms: default_stream_tick_ms(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvError(envy::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EnvError(e) => write!(f, "Environment variable error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_stream_chunk_size() -> usize {
    50
}

fn default_stream_tick_ms() -> u64 {
    50
}

fn default_session_idle_secs() -> u64 {
    86_400
}
