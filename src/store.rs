//! List Store
//!
//! Owned, in-memory state container for all shopping lists and the active
//! list pointer. Every lifecycle operation keeps the active pointer valid.

use crate::domain::{
    DomainError, DomainResult, GroceryItem, ListColor, ListIcon, ListsStorage, PendingDeletion,
    SectionKey, ShoppingList,
};

/// Changes applicable through `ListStore::update_list`
#[derive(Debug, Clone, Default)]
pub struct ListUpdate {
    pub name: Option<String>,
    pub icon: Option<ListIcon>,
    pub color: Option<ListColor>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListStore {
    state: ListsStorage,
}

fn trimmed_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput("List name cannot be empty".into()));
    }
    Ok(name.to_string())
}

impl ListStore {
    pub fn new(mut state: ListsStorage) -> Self {
        state.normalize_active();
        Self { state }
    }

    pub fn storage(&self) -> &ListsStorage {
        &self.state
    }

    pub fn lists(&self) -> &[ShoppingList] {
        &self.state.lists
    }

    pub fn active_list_id(&self) -> Option<&str> {
        self.state.active_list_id.as_deref()
    }

    pub fn active_list(&self) -> Option<&ShoppingList> {
        let id = self.state.active_list_id.as_deref()?;
        self.get(id)
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingList> {
        self.state.lists.iter().find(|list| list.id == id)
    }

    fn get_mut(&mut self, id: &str) -> DomainResult<&mut ShoppingList> {
        self.state
            .lists
            .iter_mut()
            .find(|list| list.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("List {}", id)))
    }

    /// Non-archived lists, in storage order
    pub fn unarchived(&self) -> impl Iterator<Item = &ShoppingList> {
        self.state.lists.iter().filter(|list| !list.is_archived)
    }

    pub fn archived(&self) -> impl Iterator<Item = &ShoppingList> {
        self.state.lists.iter().filter(|list| list.is_archived)
    }

    // ========================
    // List lifecycle
    // ========================

    /// Create a list and make it active
    pub fn create_list(
        &mut self,
        name: &str,
        icon: Option<ListIcon>,
        color: Option<ListColor>,
    ) -> DomainResult<ShoppingList> {
        let name = trimmed_name(name)?;
        let list = ShoppingList::new(name, Vec::new(), icon.unwrap_or_default(), color.unwrap_or_default());
        self.state.active_list_id = Some(list.id.clone());
        self.state.lists.push(list.clone());
        Ok(list)
    }

    pub fn update_list(&mut self, id: &str, update: ListUpdate) -> DomainResult<ShoppingList> {
        let name = update.name.as_deref().map(trimmed_name).transpose()?;
        let list = self.get_mut(id)?;
        if let Some(name) = name {
            list.name = name;
        }
        if let Some(icon) = update.icon {
            list.icon = icon;
        }
        if let Some(color) = update.color {
            list.color = color;
        }
        list.touch();
        Ok(list.clone())
    }

    /// Permanently remove a list
    pub fn delete_list(&mut self, id: &str) -> DomainResult<ShoppingList> {
        let index = self
            .state
            .lists
            .iter()
            .position(|list| list.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("List {}", id)))?;
        let removed = self.state.lists.remove(index);
        if self.state.active_list_id.as_deref() == Some(id) {
            self.state.active_list_id = self.state.first_unarchived_id();
        }
        Ok(removed)
    }

    pub fn archive_list(&mut self, id: &str) -> DomainResult<()> {
        let list = self.get_mut(id)?;
        list.is_archived = true;
        list.touch();
        if self.state.active_list_id.as_deref() == Some(id) {
            self.state.active_list_id = self.state.first_unarchived_id();
        }
        Ok(())
    }

    /// Un-archive a list. The active pointer is left alone.
    pub fn restore_list(&mut self, id: &str) -> DomainResult<()> {
        let list = self.get_mut(id)?;
        list.is_archived = false;
        list.touch();
        Ok(())
    }

    /// Deep-copy a list with fresh item ids and make the copy active
    pub fn duplicate_list(&mut self, id: &str) -> DomainResult<ShoppingList> {
        let original = self
            .get(id)
            .ok_or_else(|| DomainError::NotFound(format!("List {}", id)))?;

        let items = original.items.iter().map(GroceryItem::duplicate).collect();
        let copy = ShoppingList::new(format!("{} (Copy)", original.name), items, original.icon, original.color);

        self.state.active_list_id = Some(copy.id.clone());
        self.state.lists.push(copy.clone());
        Ok(copy)
    }

    pub fn set_active_list(&mut self, id: Option<&str>) -> DomainResult<()> {
        match id {
            Some(id) if !self.state.is_selectable(id) => {
                Err(DomainError::InvalidInput(format!("List {} is archived or missing", id)))
            }
            _ => {
                self.state.active_list_id = id.map(str::to_string);
                Ok(())
            }
        }
    }

    // ========================
    // Items
    // ========================

    /// Append an item to the active list
    pub fn add_item(&mut self, name: &str) -> DomainResult<GroceryItem> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("Item name cannot be empty".into()));
        }
        let active_id = self
            .state
            .active_list_id
            .clone()
            .ok_or_else(|| DomainError::NotFound("No active list".into()))?;

        let item = GroceryItem::new(name);
        let list = self.get_mut(&active_id)?;
        list.items.push(item.clone());
        list.touch();
        Ok(item)
    }

    /// Locate an item in any list
    pub fn find_item(&self, item_id: &str) -> Option<&GroceryItem> {
        self.state.lists.iter().find_map(|list| list.find_item(item_id))
    }

    fn find_item_mut(&mut self, item_id: &str) -> Option<&mut GroceryItem> {
        self.state
            .lists
            .iter_mut()
            .find_map(|list| list.find_item_mut(item_id))
    }

    /// Mutate an item wherever it lives. Returns false when it no longer exists.
    pub fn with_item<F>(&mut self, item_id: &str, f: F) -> bool
    where
        F: FnOnce(&mut GroceryItem),
    {
        match self.find_item_mut(item_id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    /// Apply a categorization result; dropped if the item was removed meanwhile
    pub fn set_item_section(&mut self, item_id: &str, section: SectionKey) -> bool {
        self.with_item(item_id, |item| {
            item.section = section;
            item.pending_categorization = false;
        })
    }

    pub fn toggle_purchased(&mut self, item_id: &str) -> DomainResult<GroceryItem> {
        let item = self
            .find_item_mut(item_id)
            .ok_or_else(|| DomainError::NotFound(format!("Item {}", item_id)))?;
        item.purchased = !item.purchased;
        Ok(item.clone())
    }

    pub fn remove_item(&mut self, item_id: &str) -> DomainResult<PendingDeletion> {
        for list in &mut self.state.lists {
            if let Some(index) = list.items.iter().position(|item| item.id == item_id) {
                let item = list.items.remove(index);
                list.touch();
                return Ok(PendingDeletion {
                    list_id: list.id.clone(),
                    item,
                    original_index: index,
                });
            }
        }
        Err(DomainError::NotFound(format!("Item {}", item_id)))
    }

    /// Put a removed item back at its original position
    pub fn undo_remove(&mut self, deletion: PendingDeletion) -> DomainResult<()> {
        let list = self.get_mut(&deletion.list_id)?;
        if list.find_item(&deletion.item.id).is_some() {
            return Err(DomainError::Conflict(format!("Item {} already present", deletion.item.id)));
        }
        let index = deletion.original_index.min(list.items.len());
        list.items.insert(index, deletion.item);
        list.touch();
        Ok(())
    }

    /// Items of the active list grouped by section, in section display order
    pub fn grouped_active_items(&self) -> Vec<(SectionKey, Vec<GroceryItem>)> {
        let Some(list) = self.active_list() else {
            return Vec::new();
        };
        SectionKey::ALL
            .into_iter()
            .filter_map(|section| {
                let items: Vec<GroceryItem> = list
                    .items
                    .iter()
                    .filter(|item| item.section == section)
                    .cloned()
                    .collect();
                (!items.is_empty()).then_some((section, items))
            })
            .collect()
    }
}
