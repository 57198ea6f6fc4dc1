//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `product`: Product records, ids and quantities
//! - `receipt`: Receipts for purchases and returns
//! - `error`: Error types for the point-of-sale engine

pub mod error;
pub mod product;
pub mod receipt;

pub use error::PosError;
pub use product::{format_price, Product, ProductId, Quantity};
pub use receipt::{Receipt, ReceiptKind, RECEIPT_TIMESTAMP_FORMAT};
