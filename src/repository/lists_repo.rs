//! Lists Repository
//!
//! Typed records on top of the key-value store: the multi-list record,
//! the legacy single-list record, the pending categorization queue and
//! the historical item frequency table.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::autocomplete::ItemFrequency;
use crate::domain::{
    DomainError, DomainResult, GroceryItem, ListColor, ListIcon, ListsStorage,
    PendingCategorization, ShoppingList, DEFAULT_LIST_NAME,
};
use super::traits::KeyValueStore;

pub const LIST_STORAGE_KEY: &str = "grocery-lists-v2";
pub const LEGACY_STORAGE_KEY: &str = "grocery-list";
pub const PENDING_STORAGE_KEY: &str = "grocery-list-pending-categorizations";
pub const ITEM_FREQUENCY_KEY: &str = "grocery-list-item-frequency";

#[derive(Clone)]
pub struct ListsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ListsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read and parse a JSON record. Corrupted records read as absent.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> DomainResult<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Ignoring corrupted record '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DomainResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| DomainError::Internal(format!("Failed to serialize '{}': {}", key, e)))?;
        self.store.set(key, &json).await
    }

    /// Wrap the legacy single-list record into a new multi-list record.
    ///
    /// Runs only when the legacy record exists and the multi-list record does
    /// not. The legacy record is left in place. Returns the written record.
    pub async fn migrate_to_list_storage(&self) -> DomainResult<Option<ListsStorage>> {
        if !self.store.contains(LEGACY_STORAGE_KEY).await? || self.store.contains(LIST_STORAGE_KEY).await? {
            return Ok(None);
        }

        let legacy_items: Vec<GroceryItem> = self.read_json(LEGACY_STORAGE_KEY).await?.unwrap_or_default();
        let default_list = ShoppingList::new(DEFAULT_LIST_NAME, legacy_items, ListIcon::Cart, ListColor::Blue);

        let storage = ListsStorage {
            active_list_id: Some(default_list.id.clone()),
            lists: vec![default_list],
        };
        self.write_json(LIST_STORAGE_KEY, &storage).await?;
        log::info!(
            "Migrated legacy list with {} items",
            storage.lists[0].items.len()
        );

        Ok(Some(storage))
    }

    /// Load the multi-list record, migrating first if needed.
    ///
    /// A pointer at an archived or missing list is corrected; a `None`
    /// pointer is returned as stored.
    pub async fn load_lists(&self) -> DomainResult<ListsStorage> {
        let mut storage = match self.migrate_to_list_storage().await? {
            Some(migrated) => migrated,
            None => self.read_json(LIST_STORAGE_KEY).await?.unwrap_or_default(),
        };

        if storage.repair_stale_active() {
            log::debug!("Active list pointer corrected to {:?}", storage.active_list_id);
        }
        Ok(storage)
    }

    pub async fn save_lists(&self, storage: &ListsStorage) -> DomainResult<()> {
        self.write_json(LIST_STORAGE_KEY, storage).await
    }

    pub async fn load_pending(&self) -> DomainResult<Vec<PendingCategorization>> {
        Ok(self.read_json(PENDING_STORAGE_KEY).await?.unwrap_or_default())
    }

    pub async fn save_pending(&self, pending: &[PendingCategorization]) -> DomainResult<()> {
        self.write_json(PENDING_STORAGE_KEY, pending).await
    }

    pub async fn load_item_frequency(&self) -> DomainResult<ItemFrequency> {
        Ok(self.read_json(ITEM_FREQUENCY_KEY).await?.unwrap_or_default())
    }

    pub async fn save_item_frequency(&self, frequency: &ItemFrequency) -> DomainResult<()> {
        self.write_json(ITEM_FREQUENCY_KEY, frequency).await
    }
}
