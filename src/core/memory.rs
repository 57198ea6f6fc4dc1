//! In-memory storage backends
//!
//! Drop-in replacements for the file-backed catalog and receipt writer.
//! Useful for tests and for embedding the engine where no filesystem
//! is wanted.

use crate::core::catalog::Catalog;
use crate::core::traits::{CatalogRepository, ReceiptSink};
use crate::types::{PosError, Receipt};
use std::path::PathBuf;

/// Catalog repository backed by a value in memory
///
/// An absent catalog behaves like a missing file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    catalog: Option<Catalog>,
    saves: usize,
}

impl InMemoryCatalog {
    /// Repository holding `catalog`
    pub fn new(catalog: Catalog) -> Self {
        InMemoryCatalog {
            catalog: Some(catalog),
            saves: 0,
        }
    }

    /// Repository with no catalog at all
    pub fn missing() -> Self {
        InMemoryCatalog {
            catalog: None,
            saves: 0,
        }
    }

    /// The currently stored catalog, if any
    pub fn stored(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// How many times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn load(&self) -> Result<Catalog, PosError> {
        self.catalog
            .clone()
            .ok_or_else(|| PosError::CatalogNotFound {
                path: "<memory>".to_string(),
            })
    }

    fn save(&mut self, catalog: &Catalog) -> Result<(), PosError> {
        self.catalog = Some(catalog.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Receipt sink that keeps receipts in a vector
///
/// Can be switched into a failing mode to exercise receipt-write errors.
#[derive(Debug, Clone, Default)]
pub struct MemoryReceiptSink {
    receipts: Vec<Receipt>,
    failing: bool,
}

impl MemoryReceiptSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every `persist` call fails
    pub fn failing() -> Self {
        MemoryReceiptSink {
            receipts: Vec::new(),
            failing: true,
        }
    }

    /// Receipts persisted so far, oldest first
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }
}

impl ReceiptSink for MemoryReceiptSink {
    fn persist(&mut self, receipt: &Receipt) -> Result<PathBuf, PosError> {
        let path = PathBuf::from(receipt.file_name());
        if self.failing {
            return Err(PosError::ReceiptWrite {
                path: path.display().to_string(),
                message: "receipt storage unavailable".to_string(),
            });
        }
        self.receipts.push(receipt.clone());
        Ok(path)
    }
}
