//! Storage seams for the engine
//!
//! The engine never touches the filesystem directly. It reads and writes the
//! catalog through a [`CatalogRepository`] and hands finished receipts to a
//! [`ReceiptSink`], so tests can swap in the in-memory implementations from
//! [`crate::core::memory`].

use crate::core::catalog::Catalog;
use crate::types::{PosError, Receipt};
use std::path::PathBuf;

/// Persistent home of the catalog
///
/// Every engine operation calls `load` first and, if it changed anything,
/// `save` once at the end. Implementations hold no cached copy.
pub trait CatalogRepository {
    /// Read the whole catalog
    ///
    /// A missing store is reported as `PosError::CatalogNotFound`.
    fn load(&self) -> Result<Catalog, PosError>;

    /// Replace the stored catalog with `catalog`
    fn save(&mut self, catalog: &Catalog) -> Result<(), PosError>;
}

/// Lets a borrowed repository back a short-lived engine or manager
impl<C: CatalogRepository + ?Sized> CatalogRepository for &mut C {
    fn load(&self) -> Result<Catalog, PosError> {
        (**self).load()
    }

    fn save(&mut self, catalog: &Catalog) -> Result<(), PosError> {
        (**self).save(catalog)
    }
}

/// Destination for settled receipts
pub trait ReceiptSink {
    /// Persist a receipt and return where it was stored
    ///
    /// Failures are reported as `PosError::ReceiptWrite`.
    fn persist(&mut self, receipt: &Receipt) -> Result<PathBuf, PosError>;
}
