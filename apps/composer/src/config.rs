//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory for the local key-value store. Unset means in-memory only.
    pub data_dir: Option<PathBuf>,
    /// How often the promotion sweep checks for due posts. Also the upper
    /// bound on how late a due post is published.
    pub sweep_interval: Duration,
    /// Remote caption endpoint. Unset means simulated captions.
    pub captions_endpoint: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("DATA_DIR").ok().map(PathBuf::from),
            sweep_interval: Duration::from_secs(
                env::var("SWEEP_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            captions_endpoint: env::var("CAPTIONS_ENDPOINT").ok(),
        }
    }
}
