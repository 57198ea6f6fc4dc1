//! Point-of-Sale Inventory Engine Library
//! # Overview
//!
//! This library provides the inventory and transaction side of a small shop
//! register: a flat-file product catalog, a shopping cart, checkout and
//! returns with timestamped receipts, and catalog maintenance.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Product, Receipt, PosError)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Locations of the catalog file and receipts directory
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Cart operations, checkout and returns
//!   - [`core::inventory`] - Catalog maintenance
//!   - [`core::catalog`] - Ordered product catalog
//!   - [`core::cart`] - Cart line items and totals
//! - [`io`] - Catalog file format and file-backed storage
//! - [`session`] - Line-oriented register session driving the engine
//!
//! # Operations
//!
//! - **Add / Remove**: Move quantity in or out of the cart, checked against stock
//! - **Checkout**: Re-validate the cart, decrement stock, issue a purchase receipt
//! - **Return**: Restock a product and issue a return receipt
//! - **Maintenance**: Add, update, or delete catalog products
//!
//! # Money
//!
//! Prices are exact decimals. Each receipt line is rounded to whole kronor
//! (half to even) and the total is the sum of the rounded lines.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod session;
pub mod types;

pub use config::StoreConfig;
pub use core::{Cart, Catalog, InventoryManager, Settlement, TransactionEngine};
pub use io::{read_catalog, write_catalog, FileCatalog, FileReceiptWriter};
pub use session::{Session, SessionCommand};
pub use types::{PosError, Product, ProductId, Quantity, Receipt, ReceiptKind};
