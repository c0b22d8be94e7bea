//! Item Entity
//!
//! A single grocery item inside a shopping list.

use serde::{Deserialize, Serialize};
use super::entity::new_id;
use super::section::SectionKey;

/// A grocery item
///
/// Field names on the wire match the stored browser records
/// (`section`, `checked`, `pendingCategorization`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    /// Unique identifier within its list
    pub id: String,
    /// Display name
    pub name: String,
    /// Assigned store section
    #[serde(default)]
    pub section: SectionKey,
    /// Purchased flag
    #[serde(rename = "checked", default)]
    pub purchased: bool,
    /// Set while the item waits for connectivity to be categorized
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pending_categorization: bool,
}

impl GroceryItem {
    /// Create a new, uncategorized item
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            section: SectionKey::FALLBACK,
            purchased: false,
            pending_categorization: false,
        }
    }

    /// Copy with a freshly generated identifier
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_id(),
            ..self.clone()
        }
    }
}

/// Queued categorization request for an item added while offline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCategorization {
    pub item_id: String,
    pub item_name: String,
}

/// A removed item, kept so the removal can be undone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDeletion {
    pub list_id: String,
    pub item: GroceryItem,
    pub original_index: usize,
}
