//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde, chrono and uuid).

mod entity;
mod section;
mod item;
mod list;
mod assets;

pub use entity::{DomainError, DomainResult, new_id};
pub use section::SectionKey;
pub use item::{GroceryItem, PendingCategorization, PendingDeletion};
pub use list::{ShoppingList, ListsStorage, DEFAULT_LIST_NAME};
pub use assets::{ListIcon, ListColor};
