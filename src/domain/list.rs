//! Shopping List Entity
//!
//! A named, ordered collection of grocery items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::assets::{ListColor, ListIcon};
use super::entity::new_id;
use super::item::GroceryItem;

/// Name given to the list created from legacy single-list data
pub const DEFAULT_LIST_NAME: &str = "My List";

/// A named shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: ListIcon,
    #[serde(default)]
    pub color: ListColor,
    /// Items in insertion order
    #[serde(default)]
    pub items: Vec<GroceryItem>,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingList {
    pub fn new(name: impl Into<String>, items: Vec<GroceryItem>, icon: ListIcon, color: ListColor) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name: name.into(),
            icon,
            color,
            items,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn find_item(&self, item_id: &str) -> Option<&GroceryItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn find_item_mut(&mut self, item_id: &str) -> Option<&mut GroceryItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }
}

/// Persisted multi-list record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListsStorage {
    #[serde(default)]
    pub lists: Vec<ShoppingList>,
    #[serde(default)]
    pub active_list_id: Option<String>,
}

impl ListsStorage {
    /// Id of the first list that is not archived
    pub fn first_unarchived_id(&self) -> Option<String> {
        self.lists
            .iter()
            .find(|list| !list.is_archived)
            .map(|list| list.id.clone())
    }

    /// Whether `id` names an existing, non-archived list
    pub fn is_selectable(&self, id: &str) -> bool {
        self.lists.iter().any(|list| list.id == id && !list.is_archived)
    }

    /// Move a pointer at an archived or missing list to the first
    /// non-archived list. `None` is left as is. Returns true when changed.
    pub fn repair_stale_active(&mut self) -> bool {
        let stale = matches!(&self.active_list_id, Some(id) if !self.is_selectable(id));
        if stale {
            self.active_list_id = self.first_unarchived_id();
        }
        stale
    }

    /// Repair the active pointer and fill an empty one.
    ///
    /// Afterwards it names a non-archived list, or is `None` when there is none.
    /// Returns true when the pointer changed.
    pub fn normalize_active(&mut self) -> bool {
        let repaired = self.repair_stale_active();
        if self.active_list_id.is_none() {
            self.active_list_id = self.first_unarchived_id();
            return repaired || self.active_list_id.is_some();
        }
        repaired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(name: &str, archived: bool) -> ShoppingList {
        let mut list = ShoppingList::new(name, vec![], ListIcon::default(), ListColor::default());
        list.is_archived = archived;
        list
    }

    #[test]
    fn test_normalize_stale_pointer() {
        let archived = list("Old", true);
        let live = list("Weekly", false);
        let mut storage = ListsStorage {
            active_list_id: Some(archived.id.clone()),
            lists: vec![archived, live.clone()],
        };

        assert!(storage.normalize_active());
        assert_eq!(storage.active_list_id, Some(live.id));
    }

    #[test]
    fn test_normalize_missing_pointer() {
        let mut storage = ListsStorage {
            active_list_id: Some("gone".into()),
            lists: vec![list("Old", true)],
        };
        storage.normalize_active();
        assert_eq!(storage.active_list_id, None);
    }

    #[test]
    fn test_normalize_keeps_valid_pointer() {
        let a = list("A", false);
        let b = list("B", false);
        let mut storage = ListsStorage {
            active_list_id: Some(b.id.clone()),
            lists: vec![a, b.clone()],
        };
        assert!(!storage.normalize_active());
        assert_eq!(storage.active_list_id, Some(b.id));
    }

    #[test]
    fn test_repair_leaves_null_pointer() {
        let mut storage = ListsStorage {
            active_list_id: None,
            lists: vec![list("A", false)],
        };
        assert!(!storage.repair_stale_active());
        assert_eq!(storage.active_list_id, None);

        assert!(storage.normalize_active());
        assert_eq!(storage.active_list_id, Some(storage.lists[0].id.clone()));
    }

    #[test]
    fn test_list_wire_format() {
        let l = list("Party", false);
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["isArchived"], false);
        assert_eq!(json["icon"], "cart");
        assert_eq!(json["color"], "blue");
        assert!(json["createdAt"].is_string());
    }
}
