//! Grocery AI Core
//!
//! Layered architecture:
//! - domain: items, lists, sections and their invariants
//! - repository: key-value persistence and the records stored through it
//! - store: the in-memory list state container and lifecycle operations
//! - commands: client bindings to the categorization endpoint
//! - app: the injectable application core tying it together, including the
//!   offline categorization queue

pub mod domain;
pub mod repository;
pub mod store;
pub mod autocomplete;
pub mod status;
pub mod connectivity;
pub mod commands;
pub mod config;
pub mod app;

pub use app::GroceryApp;
pub use config::ClientConfig;
pub use connectivity::Connectivity;
pub use domain::{DomainError, DomainResult, GroceryItem, SectionKey, ShoppingList};
