//! Core business logic module
//!
//! This module contains the inventory and transaction components:
//! - `catalog` - In-memory catalog of products
//! - `cart` - Line items for the transaction in progress
//! - `engine` - Cart operations, checkout and returns
//! - `inventory` - Catalog maintenance (add, update, delete)
//! - `input` - Coercion of operator input
//! - `traits` - Storage seams for the catalog and receipts
//! - `memory` - In-memory implementations of the storage traits

pub mod cart;
pub mod catalog;
pub mod engine;
pub mod input;
pub mod inventory;
pub mod memory;
pub mod traits;

pub use cart::{Cart, CartUpdate};
pub use catalog::Catalog;
pub use engine::{Clock, Settlement, TransactionEngine};
pub use inventory::{InventoryManager, InventoryUpdate};
pub use memory::{InMemoryCatalog, MemoryReceiptSink};
pub use traits::{CatalogRepository, ReceiptSink};
