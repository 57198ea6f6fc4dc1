//! Error types for the point-of-sale engine
//!
//! Every failure the engine can report lives in [`PosError`]. For recoverable
//! variants the `Display` text is the exact status line shown to the operator,
//! so callers can render an error verbatim without further formatting.
//!
//! # Error Categories
//!
//! - **Fatal**: missing or unreadable catalog file, malformed catalog records,
//!   receipt files that cannot be written on the return flow
//! - **Recoverable**: invalid numeric input, unknown products, insufficient
//!   stock, cart mismatches, empty cart at checkout
//! - **Integrity**: checked quantity arithmetic that would leave the valid range

use crate::types::product::{ProductId, Quantity};
use thiserror::Error;

/// Main error type for the point-of-sale engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PosError {
    /// The catalog file does not exist
    ///
    /// The engine cannot operate without an inventory, so this is fatal.
    #[error("File {path} not found")]
    CatalogNotFound {
        /// Path of the missing catalog file
        path: String,
    },

    /// I/O error while reading or writing the catalog
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A catalog line could not be parsed into a product record
    #[error("Malformed inventory record{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedRecord {
        /// Line number of the offending record (if available)
        line: Option<u64>,
        /// Description of the problem
        message: String,
    },

    /// A receipt file could not be written
    #[error("Error: {message}\nReceipt not saved")]
    ReceiptWrite {
        /// Target path of the receipt
        path: String,
        /// Description of the I/O error
        message: String,
    },

    /// A cart or return quantity is not an integer of at least one
    #[error("Invalid quantity")]
    InvalidQuantity {
        /// The rejected input
        input: String,
    },

    /// A maintenance price or quantity is not a non-negative number
    #[error("Invalid value, please enter a number")]
    InvalidValue {
        /// The rejected input
        input: String,
    },

    /// A product name or id cannot be stored in the flat catalog format
    #[error("Name and id must be non-empty and must not contain commas")]
    InvalidField {
        /// Which field was rejected ("name" or "id")
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// No product with this id exists in the catalog
    #[error("Product not found")]
    ProductNotFound {
        /// The id that was looked up
        id: ProductId,
    },

    /// The catalog holds less stock than requested
    #[error("Not enough quantity, only {available} left")]
    InsufficientStock {
        /// Product id
        id: ProductId,
        /// Quantity currently in stock
        available: Quantity,
        /// Quantity requested
        requested: Quantity,
    },

    /// The product is not in the cart, or the cart holds less than requested
    #[error("Product not in shopping cart or not enough quantity")]
    NotInCart {
        /// Product id
        id: ProductId,
        /// Quantity requested for removal
        requested: Quantity,
    },

    /// Checkout was attempted with nothing in the cart
    #[error("Shopping cart is empty")]
    EmptyCart,

    /// Decreasing a quantity would take it below zero
    #[error("Quantity underflow for product {id}: have {quantity}, removing {requested}")]
    QuantityUnderflow {
        /// Product id
        id: ProductId,
        /// Quantity before the operation
        quantity: Quantity,
        /// Amount that was to be removed
        requested: Quantity,
    },

    /// Increasing a quantity would exceed the representable range
    #[error("Quantity overflow for product {id}: have {quantity}, adding {requested}")]
    QuantityOverflow {
        /// Product id
        id: ProductId,
        /// Quantity before the operation
        quantity: Quantity,
        /// Amount that was to be added
        requested: Quantity,
    },

    /// A session line that is not a known command
    #[error("Unknown command: {input}")]
    UnknownCommand {
        /// The rejected line
        input: String,
    },

    /// A price times quantity does not fit in a decimal
    #[error("Arithmetic overflow computing total for product {id}")]
    TotalOverflow {
        /// Product id
        id: ProductId,
    },
}

impl From<std::io::Error> for PosError {
    fn from(error: std::io::Error) -> Self {
        PosError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for PosError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        PosError::MalformedRecord {
            line,
            message: error.to_string(),
        }
    }
}

impl PosError {
    /// Whether this error must stop the program rather than be reported as a status
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PosError::CatalogNotFound { .. }
                | PosError::IoError { .. }
                | PosError::MalformedRecord { .. }
                | PosError::ReceiptWrite { .. }
        )
    }

    /// Create a ProductNotFound error
    pub fn product_not_found(id: &str) -> Self {
        PosError::ProductNotFound { id: id.to_string() }
    }

    /// Create an InsufficientStock error
    pub fn insufficient_stock(id: &str, available: Quantity, requested: Quantity) -> Self {
        PosError::InsufficientStock {
            id: id.to_string(),
            available,
            requested,
        }
    }

    /// Create a NotInCart error
    pub fn not_in_cart(id: &str, requested: Quantity) -> Self {
        PosError::NotInCart {
            id: id.to_string(),
            requested,
        }
    }

    /// Create an InvalidQuantity error
    pub fn invalid_quantity(input: &str) -> Self {
        PosError::InvalidQuantity {
            input: input.to_string(),
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(input: &str) -> Self {
        PosError::InvalidValue {
            input: input.to_string(),
        }
    }

    /// Create an InvalidField error
    pub fn invalid_field(field: &'static str, value: &str) -> Self {
        PosError::InvalidField {
            field,
            value: value.to_string(),
        }
    }

    /// Create a QuantityUnderflow error
    pub fn quantity_underflow(id: &str, quantity: Quantity, requested: Quantity) -> Self {
        PosError::QuantityUnderflow {
            id: id.to_string(),
            quantity,
            requested,
        }
    }

    /// Create a QuantityOverflow error
    pub fn quantity_overflow(id: &str, quantity: Quantity, requested: Quantity) -> Self {
        PosError::QuantityOverflow {
            id: id.to_string(),
            quantity,
            requested,
        }
    }

    /// Create a MalformedRecord error
    pub fn malformed_record(line: Option<u64>, message: impl Into<String>) -> Self {
        PosError::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}
