//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for local persistence.
//! Values are whole JSON documents; every write replaces the previous value.

use async_trait::async_trait;
use crate::domain::DomainResult;

/// String key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Remove `key` if present
    async fn remove(&self, key: &str) -> DomainResult<()>;

    /// Whether a value exists under `key`
    async fn contains(&self, key: &str) -> DomainResult<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
