//! In-memory catalog
//!
//! The catalog maps product ids to product records. It is loaded wholesale
//! from a [`CatalogRepository`](crate::core::traits::CatalogRepository) at
//! the start of every operation and written back wholesale after a mutation,
//! so nothing here is long-lived.
//!
//! Records keep the order they were first inserted in. Replacing a record
//! keeps its position, which makes a load/save cycle reproduce the file
//! line for line.

use crate::types::Product;
use std::fmt;

/// Products keyed by id, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Catalog {
            products: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Look up a product by id
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Look up a product by id for mutation
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|product| product.id == id)
    }

    /// Insert a product, replacing any record with the same id
    ///
    /// A replaced record keeps its position. Returns the previous record.
    pub fn upsert(&mut self, product: Product) -> Option<Product> {
        match self.position(&product.id) {
            Some(index) => Some(std::mem::replace(&mut self.products[index], product)),
            None => {
                self.products.push(product);
                None
            }
        }
    }

    /// Remove and return the product with this id
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        self.position(id).map(|index| self.products.remove(index))
    }

    /// Iterate products in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|product| product.id == id)
    }
}

impl FromIterator<Product> for Catalog {
    /// Later records with a duplicate id replace earlier ones in place
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for product in iter {
            catalog.upsert(product);
        }
        catalog
    }
}

/// Inventory listing, one product per line after a header
impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Inventory:")?;
        for product in &self.products {
            write!(f, "\n{}", product)?;
        }
        Ok(())
    }
}
