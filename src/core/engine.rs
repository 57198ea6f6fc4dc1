//! Transaction processing engine
//!
//! This module provides the TransactionEngine that runs the register side of
//! the system: building a cart, checking out, and processing returns. It
//! coordinates between the catalog repository, the cart, and the receipt sink.
//!
//! The engine enforces business rules such as:
//! - Every operation re-reads the catalog before using it
//! - Stock never goes below zero; checkout re-validates every cart line
//! - Checkout updates the inventory even if its receipt cannot be saved
//! - A return persists its receipt before the catalog

use crate::core::cart::{Cart, CartUpdate};
use crate::core::input::parse_line_quantity;
use crate::core::traits::{CatalogRepository, ReceiptSink};
use crate::types::{PosError, Receipt, ReceiptKind};
use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Source of receipt timestamps
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Outcome of a checkout or return
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// The receipt issued for the transaction
    pub receipt: Receipt,

    /// Where the receipt was stored, or `None` if saving it failed
    pub saved_to: Option<PathBuf>,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let note = if self.saved_to.is_some() {
            "Receipt saved!"
        } else {
            "Receipt not saved"
        };
        write!(f, "{}\n\n{}", self.receipt, note)
    }
}

/// Register-side transaction engine
///
/// Owns the cart for the active session. The catalog is not held between
/// calls; each operation loads it from the repository and saves it at most
/// once.
pub struct TransactionEngine<C, R> {
    catalog: C,
    receipts: R,
    cart: Cart,
    clock: Clock,
}

impl<C: CatalogRepository, R: ReceiptSink> TransactionEngine<C, R> {
    /// Create an engine with an empty cart
    pub fn new(catalog: C, receipts: R) -> Self {
        TransactionEngine {
            catalog,
            receipts,
            cart: Cart::new(),
            clock: local_now,
        }
    }

    /// Replace the clock used to timestamp receipts
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog_repository(&self) -> &C {
        &self.catalog
    }

    pub fn catalog_repository_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    pub fn receipt_sink(&self) -> &R {
        &self.receipts
    }

    /// Reserve a quantity of a product in the cart
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is not an integer of at least one
    /// - `ProductNotFound` / `InsufficientStock` from [`Cart::add`]
    /// - fatal catalog errors from the repository
    pub fn add_to_cart(&mut self, id: &str, quantity: &str) -> Result<CartUpdate, PosError> {
        let id = id.trim();
        let quantity = parse_line_quantity(quantity)?;
        let catalog = self.catalog.load()?;
        let update = self.cart.add(&catalog, id, quantity)?;
        debug!(id, quantity, "added to cart");
        Ok(update)
    }

    /// Take a quantity of a product out of the cart
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is not an integer of at least one
    /// - `NotInCart` from [`Cart::remove`]
    pub fn remove_from_cart(&mut self, id: &str, quantity: &str) -> Result<CartUpdate, PosError> {
        let id = id.trim();
        let quantity = parse_line_quantity(quantity)?;
        let update = self.cart.remove(id, quantity)?;
        debug!(id, quantity, "removed from cart");
        Ok(update)
    }

    /// Empty the cart
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("cart cleared");
    }

    /// Settle the cart as a purchase
    ///
    /// Loads the catalog, takes every cart line out of stock, issues a
    /// purchase receipt, tries to persist it, then saves the catalog and
    /// empties the cart. A receipt that cannot be saved is logged and
    /// reported through `Settlement::saved_to`, but the inventory update
    /// still goes through.
    ///
    /// # Errors
    ///
    /// - `EmptyCart` if there is nothing to settle
    /// - `ProductNotFound` if a cart line's product left the catalog
    /// - `InsufficientStock` if the catalog no longer covers a cart line
    /// - fatal catalog errors from the repository
    ///
    /// On error nothing is saved and the cart is left as it was.
    pub fn checkout(&mut self) -> Result<Settlement, PosError> {
        if self.cart.is_empty() {
            return Err(PosError::EmptyCart);
        }

        let mut catalog = self.catalog.load()?;

        // All lines are applied to the loaded copy before anything is written
        for line in self.cart.lines() {
            let product = catalog
                .get_mut(&line.id)
                .ok_or_else(|| PosError::product_not_found(&line.id))?;
            let available = product.quantity;
            product
                .decrease_quantity(line.quantity)
                .map_err(|_| PosError::insufficient_stock(&line.id, available, line.quantity))?;
        }

        let receipt = Receipt::new(
            ReceiptKind::Purchase,
            self.cart.lines().to_vec(),
            (self.clock)(),
        )?;

        let saved_to = match self.receipts.persist(&receipt) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "purchase receipt not saved, updating inventory anyway");
                None
            }
        };

        self.catalog.save(&catalog)?;
        self.cart.clear();

        info!(
            lines = receipt.lines().len(),
            total = %receipt.total(),
            "checkout completed"
        );

        Ok(Settlement { receipt, saved_to })
    }

    /// Take a product back into stock and pay the customer
    ///
    /// Independent of the cart. Persists the return receipt first and the
    /// catalog second.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if `id` is not in the catalog
    /// - `InvalidQuantity` if `quantity` is not an integer of at least one
    /// - `QuantityOverflow` if the stock level would overflow
    /// - fatal `ReceiptWrite` if the receipt cannot be stored, in which case
    ///   the catalog is not saved
    /// - fatal catalog errors from the repository
    pub fn return_item(&mut self, id: &str, quantity: &str) -> Result<Settlement, PosError> {
        let id = id.trim();
        let mut catalog = self.catalog.load()?;
        let product = catalog
            .get_mut(id)
            .ok_or_else(|| PosError::product_not_found(id))?;
        let quantity = parse_line_quantity(quantity)?;

        product.increase_quantity(quantity)?;
        let receipt = Receipt::new(
            ReceiptKind::Return,
            vec![product.with_quantity(quantity)],
            (self.clock)(),
        )?;

        let path = self.receipts.persist(&receipt)?;
        self.catalog.save(&catalog)?;

        info!(id, quantity, total = %receipt.total(), "return completed");

        Ok(Settlement {
            receipt,
            saved_to: Some(path),
        })
    }
}
