//! Query API server configuration.

use serde::Deserialize;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base URL of the external search index (CS_INDEX_URL env var).
    /// None means serve from the in-memory sample catalog.
    pub index_url: Option<String>,
    /// Per-request timeout for index calls, in seconds.
    #[serde(default = "default_index_timeout_secs")]
    pub index_timeout_secs: u64,
    /// Vocabulary refresh cadence, in seconds.
    #[serde(default = "default_vocab_refresh_secs")]
    pub vocab_refresh_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_index_timeout_secs() -> u64 {
    10
}

fn default_vocab_refresh_secs() -> u64 {
    300
}

impl ApiConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("CS_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("CS_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        config.index_url = std::env::var("CS_INDEX_URL").ok().filter(|s| !s.is_empty());
        if let Ok(secs) = std::env::var("CS_INDEX_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.index_timeout_secs = secs;
            }
        }
        if let Ok(secs) = std::env::var("CS_VOCAB_REFRESH_SECS") {
            if let Ok(secs) = secs.parse() {
                config.vocab_refresh_secs = secs;
            }
        }
        config
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            index_url: None,
            index_timeout_secs: default_index_timeout_secs(),
            vocab_refresh_secs: default_vocab_refresh_secs(),
        }
    }
}
