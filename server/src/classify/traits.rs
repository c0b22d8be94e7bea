//! Text generation seam
//!
//! The classifier only needs "prompt in, text out"; providers implement this.

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Transport failure or timeout
    Request(String),
    /// Non-success HTTP status
    Status { code: u16, body: String },
    /// Response parsed but carried no text
    EmptyReply,
    /// Response body was not the expected shape
    Malformed(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Request(msg) => write!(f, "Provider request failed: {}", msg),
            ProviderError::Status { code, body } => write!(f, "Provider returned {}: {}", code, body),
            ProviderError::EmptyReply => write!(f, "Provider reply contained no text"),
            ProviderError::Malformed(msg) => write!(f, "Malformed provider reply: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
