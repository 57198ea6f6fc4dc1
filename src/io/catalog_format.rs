//! Flat-file catalog format
//!
//! One product per line, comma-delimited, no header:
//!
//! ```text
//! name,id,price,quantity
//! Pen,101,5.0,10
//! ```
//!
//! There is no quoting or escaping, so names and ids must not contain commas.
//! Fields are trimmed and blank lines are skipped on read.
//!
//! The functions here work on any reader or writer, which keeps them easy to
//! test without touching the filesystem.

use crate::core::Catalog;
use crate::types::{format_price, PosError, Product, Quantity};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Trim, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::str::FromStr;

/// Number of fields in a catalog line
const FIELD_COUNT: usize = 4;

/// One catalog line as raw text fields
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CatalogRecord {
    pub name: String,
    pub id: String,
    pub price: String,
    pub quantity: String,
}

/// One catalog line ready to be written
#[derive(Debug, Serialize)]
struct CatalogRow<'a> {
    name: &'a str,
    id: &'a str,
    price: String,
    quantity: Quantity,
}

/// Convert a raw catalog record into a product
///
/// # Errors
///
/// Returns `MalformedRecord` if the price is not a non-negative decimal or the
/// quantity is not a non-negative integer.
pub fn convert_catalog_record(
    record: CatalogRecord,
    line: Option<u64>,
) -> Result<Product, PosError> {
    let price = match Decimal::from_str(&record.price) {
        Ok(price) if !price.is_sign_negative() || price.is_zero() => price,
        _ => {
            return Err(PosError::malformed_record(
                line,
                format!("invalid price '{}' for product {}", record.price, record.id),
            ))
        }
    };

    let quantity = Quantity::from_str(&record.quantity).map_err(|_| {
        PosError::malformed_record(
            line,
            format!(
                "invalid quantity '{}' for product {}",
                record.quantity, record.id
            ),
        )
    })?;

    Ok(Product::new(record.name, record.id, price, quantity))
}

fn parse_record(record: &StringRecord) -> Result<Product, PosError> {
    let line = record.position().map(|pos| pos.line());

    if record.len() != FIELD_COUNT {
        return Err(PosError::malformed_record(
            line,
            format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
        ));
    }

    let raw: CatalogRecord = record
        .deserialize(None)
        .map_err(|e| PosError::malformed_record(line, e.to_string()))?;

    convert_catalog_record(raw, line)
}

/// Read a whole catalog
///
/// A later line with an id already seen replaces the earlier record.
///
/// # Errors
///
/// Returns `MalformedRecord` for the first line that cannot be parsed.
pub fn read_catalog<R: Read>(input: R) -> Result<Catalog, PosError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(input);

    let mut catalog = Catalog::new();
    for result in reader.records() {
        let record = result?;
        catalog.upsert(parse_record(&record)?);
    }

    Ok(catalog)
}

/// Write a whole catalog, one line per product in catalog order
pub fn write_catalog<W: Write>(catalog: &Catalog, output: W) -> Result<(), PosError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(output);

    for product in catalog.iter() {
        writer
            .serialize(CatalogRow {
                name: &product.name,
                id: &product.id,
                price: format_price(product.price),
                quantity: product.quantity,
            })
            .map_err(|e| PosError::IoError {
                message: format!("Failed to write catalog record: {}", e),
            })?;
    }

    writer.flush()?;
    Ok(())
}
