//! Coercion of operator input into validated values
//!
//! All operator input arrives as text. These functions trim it and turn it
//! into typed values, mapping every failure to the status the operator sees.

use crate::types::{PosError, Quantity};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a cart or return quantity: an integer of at least one
pub fn parse_line_quantity(input: &str) -> Result<Quantity, PosError> {
    match Quantity::from_str(input.trim()) {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(PosError::invalid_quantity(input)),
    }
}

/// Parse a stock level for catalog maintenance: a non-negative integer
pub fn parse_stock_quantity(input: &str) -> Result<Quantity, PosError> {
    Quantity::from_str(input.trim()).map_err(|_| PosError::invalid_value(input))
}

/// Parse a unit price for catalog maintenance: a non-negative decimal
pub fn parse_price(input: &str) -> Result<Decimal, PosError> {
    match Decimal::from_str(input.trim()) {
        Ok(price) if !price.is_sign_negative() || price.is_zero() => Ok(price),
        _ => Err(PosError::invalid_value(input)),
    }
}

/// Check that a name or id can be stored in the comma-delimited catalog
pub fn validate_field(field: &'static str, value: &str) -> Result<(), PosError> {
    if value.trim().is_empty() || value.contains([',', '\n', '\r']) {
        return Err(PosError::invalid_field(field, value));
    }
    Ok(())
}
