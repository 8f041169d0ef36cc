use packlens_extractor::{DEFAULT_MODEL, OPENAI_API_BASE};

/// PackLens runtime configuration.
///
/// Only the endpoint, model, and timing knobs live here. The API credential
/// is deliberately absent: it arrives per invocation via flag or prompt and
/// is never read from the environment or a config file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API base URL
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Log level
    pub log_level: String,
    /// Directory for rolling log files; file logging is off when unset
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: OPENAI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 60,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("PACKLENS_BASE_URL").unwrap_or(defaults.base_url),
            model: std::env::var("PACKLENS_MODEL").unwrap_or(defaults.model),
            timeout_secs: std::env::var("PACKLENS_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_dir: std::env::var("PACKLENS_LOG_DIR").ok(),
        }
    }
}
