//! Product record for the catalog and the cart
//!
//! A `Product` is a plain value: the catalog owns one per id, and cart lines
//! hold detached copies taken at add-time, so later catalog edits never leak
//! into an open cart.

use super::error::PosError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Product identifier, unique within a catalog
pub type ProductId = String;

/// Stock or line quantity
///
/// Unsigned so that a committed quantity can never be negative.
pub type Quantity = u32;

/// A product with its unit price and a quantity
///
/// In the catalog `quantity` is the stock level; in a cart or on a receipt
/// it is the number of units on that line.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Display name (must not contain commas)
    pub name: String,

    /// Unique product id (must not contain commas)
    pub id: ProductId,

    /// Unit price in kronor, non-negative
    pub price: Decimal,

    /// Number of units
    pub quantity: Quantity,
}

impl Product {
    /// Create a new product record
    pub fn new(
        name: impl Into<String>,
        id: impl Into<ProductId>,
        price: Decimal,
        quantity: Quantity,
    ) -> Self {
        Product {
            name: name.into(),
            id: id.into(),
            price,
            quantity,
        }
    }

    /// Detached copy of this record carrying a different quantity
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Product {
            quantity,
            ..self.clone()
        }
    }

    /// Add `amount` units
    ///
    /// # Errors
    ///
    /// Returns `QuantityOverflow` if the result does not fit in a `Quantity`.
    /// The record is unchanged on error.
    pub fn increase_quantity(&mut self, amount: Quantity) -> Result<(), PosError> {
        self.quantity = self
            .quantity
            .checked_add(amount)
            .ok_or_else(|| PosError::quantity_overflow(&self.id, self.quantity, amount))?;
        Ok(())
    }

    /// Remove `amount` units
    ///
    /// # Errors
    ///
    /// Returns `QuantityUnderflow` if `amount` exceeds the current quantity.
    /// The record is unchanged on error.
    pub fn decrease_quantity(&mut self, amount: Quantity) -> Result<(), PosError> {
        self.quantity = self
            .quantity
            .checked_sub(amount)
            .ok_or_else(|| PosError::quantity_underflow(&self.id, self.quantity, amount))?;
        Ok(())
    }

    /// Price of this line rounded to whole kronor
    ///
    /// Rounds half to even, so `2.5` becomes `2` and `3.5` becomes `4`.
    pub fn line_total(&self) -> Result<Decimal, PosError> {
        let exact = self
            .price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| PosError::TotalOverflow {
                id: self.id.clone(),
            })?;
        Ok(exact.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
    }
}

/// Render a price the way receipts and the catalog file expect
///
/// Integral prices keep a single decimal (`5.0`), everything else drops
/// trailing zeros (`2.50` becomes `2.5`).
pub fn format_price(price: Decimal) -> String {
    let normalized = price.normalize();
    if normalized.scale() == 0 {
        format!("{}.0", normalized)
    } else {
        normalized.to_string()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} kr, {} st",
            self.name,
            self.id,
            format_price(self.price),
            self.quantity
        )
    }
}
