//! Catalog maintenance
//!
//! This module provides the `InventoryManager`, the back-office side of the
//! register: listing the catalog and adding, updating, or deleting products.
//! Like the transaction engine, it loads the catalog fresh for every call and
//! saves it once after a successful change.

use crate::core::catalog::Catalog;
use crate::core::input::{parse_price, parse_stock_quantity, validate_field};
use crate::core::traits::CatalogRepository;
use crate::types::{PosError, Product};
use std::fmt;
use tracing::info;

/// Result of a successful maintenance operation, rendered as the operator status
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryUpdate {
    /// A product was created or fully replaced
    Added(Product),
    /// An existing product got a new price and quantity
    Updated(Product),
    /// A product was removed
    Deleted(Product),
}

impl fmt::Display for InventoryUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryUpdate::Added(product) | InventoryUpdate::Updated(product) => {
                write!(f, "{}\n\nInventory updated!", product)
            }
            InventoryUpdate::Deleted(product) => {
                write!(f, "{} deleted!\n\nInventory updated!", product)
            }
        }
    }
}

/// Manages catalog entries through a repository
pub struct InventoryManager<C> {
    catalog: C,
}

impl<C: CatalogRepository> InventoryManager<C> {
    pub fn new(catalog: C) -> Self {
        InventoryManager { catalog }
    }

    pub fn catalog_repository(&self) -> &C {
        &self.catalog
    }

    /// Current catalog, for listing
    pub fn view_inventory(&self) -> Result<Catalog, PosError> {
        self.catalog.load()
    }

    /// Create a product, or replace every field of an existing one
    ///
    /// The catalog is loaded before any input is checked, so a missing
    /// catalog is reported ahead of bad values.
    ///
    /// There is no duplicate detection: an existing record with the same id
    /// is overwritten.
    ///
    /// # Errors
    ///
    /// - `InvalidField` if the name or id is empty or contains a comma
    /// - `InvalidValue` if the price or quantity is not a non-negative number
    /// - fatal catalog errors from the repository
    pub fn add_product(
        &mut self,
        name: &str,
        id: &str,
        price: &str,
        quantity: &str,
    ) -> Result<InventoryUpdate, PosError> {
        let mut catalog = self.catalog.load()?;
        validate_field("name", name)?;
        validate_field("id", id)?;
        let price = parse_price(price)?;
        let quantity = parse_stock_quantity(quantity)?;

        let product = Product::new(name.trim(), id.trim(), price, quantity);
        let replaced = catalog.upsert(product.clone());
        self.catalog.save(&catalog)?;

        info!(id = %product.id, replaced = replaced.is_some(), "product added");
        Ok(InventoryUpdate::Added(product))
    }

    /// Set a new price and quantity on an existing product, keeping its name
    ///
    /// The quantity replaces the stock level; it is not added to it.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if `id` is not in the catalog
    /// - `InvalidValue` if the price or quantity is not a non-negative number
    /// - fatal catalog errors from the repository
    pub fn update_product(
        &mut self,
        id: &str,
        price: &str,
        quantity: &str,
    ) -> Result<InventoryUpdate, PosError> {
        let id = id.trim();
        let mut catalog = self.catalog.load()?;
        let existing = catalog
            .get(id)
            .ok_or_else(|| PosError::product_not_found(id))?;
        let price = parse_price(price)?;
        let quantity = parse_stock_quantity(quantity)?;

        let product = Product::new(existing.name.clone(), id, price, quantity);
        catalog.upsert(product.clone());
        self.catalog.save(&catalog)?;

        info!(id, %price, quantity, "product updated");
        Ok(InventoryUpdate::Updated(product))
    }

    /// Remove a product from the catalog
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if `id` is not in the catalog; nothing is written
    /// - fatal catalog errors from the repository
    pub fn delete_product(&mut self, id: &str) -> Result<InventoryUpdate, PosError> {
        let id = id.trim();
        let mut catalog = self.catalog.load()?;
        let product = catalog
            .remove(id)
            .ok_or_else(|| PosError::product_not_found(id))?;
        self.catalog.save(&catalog)?;

        info!(id, "product deleted");
        Ok(InventoryUpdate::Deleted(product))
    }
}
