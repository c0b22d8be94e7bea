//! Categorize Command
//!
//! `POST /api/categorize` over HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::domain::SectionKey;
use super::{Categorizer, ConnectivityError};

pub const CATEGORIZE_PATH: &str = "/api/categorize";

// ========================
// Argument Structs
// ========================

#[derive(Debug, Serialize)]
pub struct CategorizeArgs<'a> {
    pub item: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizeResponse {
    #[serde(default)]
    pub section: SectionKey,
}

// ========================
// Client
// ========================

pub struct HttpCategorizer {
    client: reqwest::Client,
    url: String,
}

impl HttpCategorizer {
    pub fn new(config: &ClientConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            client,
            url: format!("{}{}", config.api_base_url.trim_end_matches('/'), CATEGORIZE_PATH),
        })
    }
}

/// Whether a transport error means the server could not be reached at all
fn is_connectivity_error(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout()
}

#[async_trait]
impl Categorizer for HttpCategorizer {
    async fn categorize(&self, item_name: &str) -> Result<SectionKey, ConnectivityError> {
        let response = match self
            .client
            .post(&self.url)
            .json(&CategorizeArgs { item: item_name })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if is_connectivity_error(&e) => {
                log::info!("Categorization for '{}' deferred: {}", item_name, e);
                return Err(ConnectivityError(e.to_string()));
            }
            Err(e) => {
                log::warn!("Categorization request for '{}' failed: {}", item_name, e);
                return Ok(SectionKey::FALLBACK);
            }
        };

        if !response.status().is_success() {
            log::warn!("Categorization for '{}' returned {}", item_name, response.status());
            return Ok(SectionKey::FALLBACK);
        }

        match response.json::<CategorizeResponse>().await {
            Ok(body) => Ok(body.section),
            Err(e) if e.is_timeout() => Err(ConnectivityError(e.to_string())),
            Err(e) => {
                log::warn!("Malformed categorization reply for '{}': {}", item_name, e);
                Ok(SectionKey::FALLBACK)
            }
        }
    }
}
