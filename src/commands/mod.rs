//! Backend Command Bindings
//!
//! Client side of the categorization endpoint, behind the `Categorizer` port
//! so the offline queue can be exercised without a network.

mod categorize;

use async_trait::async_trait;
use crate::domain::SectionKey;

pub use categorize::{HttpCategorizer, CategorizeArgs, CategorizeResponse, CATEGORIZE_PATH};

/// The categorization request never reached a server.
///
/// Any other failure is resolved to the fallback section instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityError(pub String);

impl std::fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Offline: {}", self.0)
    }
}

impl std::error::Error for ConnectivityError {}

/// Resolves an item name to a store section
#[async_trait]
pub trait Categorizer: Send + Sync {
    async fn categorize(&self, item_name: &str) -> Result<SectionKey, ConnectivityError>;
}
