//! Shopping cart for one customer interaction
//!
//! The cart is transient: it is never persisted and only lives as long as the
//! register session that owns it. Each line is a detached copy of the catalog
//! record taken when the product was first added, carrying the reserved
//! quantity instead of the stock level.
//!
//! The cart validates against a catalog snapshot passed in by the caller but
//! never changes it. Stock is only touched at checkout.

use crate::core::catalog::Catalog;
use crate::types::{PosError, Product, Quantity};
use rust_decimal::Decimal;
use std::fmt;

/// Result of a successful cart change, rendered as the operator status
#[derive(Debug, Clone, PartialEq)]
pub enum CartUpdate {
    /// A new line was created
    Added {
        /// Units added
        added: Quantity,
        /// The new cart line
        line: Product,
    },

    /// Units were added to an existing line
    Merged {
        /// Units added
        added: Quantity,
        /// The line after merging
        line: Product,
    },

    /// A line was removed entirely
    Removed {
        /// The line as it was before removal
        line: Product,
    },

    /// Units were taken off a line that is still in the cart
    Reduced {
        /// Units removed
        removed: Quantity,
        /// The line after reduction
        line: Product,
    },
}

impl fmt::Display for CartUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartUpdate::Added { added, line } => write!(
                f,
                "{}st {} added to shopping cart: {}",
                added, line.name, line
            ),
            CartUpdate::Merged { added, line } => {
                write!(f, "{}st {} added to shopping cart", added, line.name)
            }
            CartUpdate::Removed { line } => write!(f, "Removed {} from shopping cart", line),
            CartUpdate::Reduced { removed, line } => write!(
                f,
                "Removed {} {} from shopping cart, {} remains",
                removed, line.name, line.quantity
            ),
        }
    }
}

/// Line items reserved for the transaction in progress, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<Product>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Cart lines in the order they were first added
    pub fn lines(&self) -> &[Product] {
        &self.lines
    }

    /// Look up the cart line for a product
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Reserve `quantity` units of product `id`
    ///
    /// The reservation is checked against the catalog stock minus what the
    /// cart already holds for that product, so a cart can never promise more
    /// than the catalog has.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if `id` is not in the catalog
    /// - `InsufficientStock` if fewer than `quantity` units remain unreserved
    ///
    /// The cart is unchanged on error.
    pub fn add(
        &mut self,
        catalog: &Catalog,
        id: &str,
        quantity: Quantity,
    ) -> Result<CartUpdate, PosError> {
        let product = catalog
            .get(id)
            .ok_or_else(|| PosError::product_not_found(id))?;

        let reserved = self.get(id).map_or(0, |line| line.quantity);
        let available = product.quantity.saturating_sub(reserved);
        if available < quantity {
            return Err(PosError::insufficient_stock(id, available, quantity));
        }

        match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                line.increase_quantity(quantity)?;
                Ok(CartUpdate::Merged {
                    added: quantity,
                    line: line.clone(),
                })
            }
            None => {
                let line = product.with_quantity(quantity);
                self.lines.push(line.clone());
                Ok(CartUpdate::Added {
                    added: quantity,
                    line,
                })
            }
        }
    }

    /// Take `quantity` units of product `id` out of the cart
    ///
    /// Removing exactly the reserved amount drops the line.
    ///
    /// # Errors
    ///
    /// Returns `NotInCart` if the product is not in the cart or the cart holds
    /// fewer than `quantity` units. The cart is unchanged on error.
    pub fn remove(&mut self, id: &str, quantity: Quantity) -> Result<CartUpdate, PosError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.id == id && quantity <= line.quantity)
            .ok_or_else(|| PosError::not_in_cart(id, quantity))?;

        if self.lines[index].quantity == quantity {
            let line = self.lines.remove(index);
            return Ok(CartUpdate::Removed { line });
        }

        let line = &mut self.lines[index];
        line.decrease_quantity(quantity)?;
        Ok(CartUpdate::Reduced {
            removed: quantity,
            line: line.clone(),
        })
    }

    /// Drop every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Running total using the same per-line rounding as receipts
    pub fn total(&self) -> Result<Decimal, PosError> {
        self.lines.iter().try_fold(Decimal::ZERO, |total, line| {
            let line_total = line.line_total()?;
            total
                .checked_add(line_total)
                .ok_or_else(|| PosError::TotalOverflow {
                    id: line.id.clone(),
                })
        })
    }
}

/// Cart view: one line per item and the running total
impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Shopping cart is empty");
        }
        write!(f, "Shopping cart:")?;
        for line in &self.lines {
            write!(f, "\n{}", line)?;
        }
        match self.total() {
            Ok(total) => write!(f, "\nTotal price: {} kr", total),
            Err(e) => write!(f, "\n{}", e),
        }
    }
}
