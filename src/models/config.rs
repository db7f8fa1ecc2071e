//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_page_size() -> u32 {
    12
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_search_debounce_ms() -> u64 {
    500
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Base URL of the inventory REST backend, without a trailing slash.
    pub api_base_url: String,
    pub templates_dir: String,
    pub secret: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Quiet period applied to free-text search inputs.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default)]
    pub cookie_secure: bool,
}
