//! Client Configuration

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service hosting `/api/categorize`
    pub api_base_url: String,
    /// Per-request timeout for categorization calls
    pub request_timeout: Duration,
    /// Delay between consecutive retries of queued items
    pub retry_stagger: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(15),
            retry_stagger: Duration::from_millis(100),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL overridable through `GROCERY_API_URL`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("GROCERY_API_URL") {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().to_string();
            }
        }
        config
    }
}
