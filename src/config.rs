//! Store configuration
//!
//! Where the catalog file and the receipts directory live. Built from the
//! command line by [`CliArgs::to_store_config`](crate::cli::CliArgs::to_store_config).

use crate::core::TransactionEngine;
use crate::io::{FileCatalog, FileReceiptWriter};
use std::path::PathBuf;

/// Default catalog file name
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.txt";

/// Default receipts directory
pub const DEFAULT_RECEIPTS_DIR: &str = "receipts";

/// Locations of the files the register works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Catalog file
    pub inventory_path: PathBuf,

    /// Directory receipts are written into (created on first receipt)
    pub receipts_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(inventory_path: impl Into<PathBuf>, receipts_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            inventory_path: inventory_path.into(),
            receipts_dir: receipts_dir.into(),
        }
    }

    /// Repository for the configured catalog file
    pub fn catalog(&self) -> FileCatalog {
        FileCatalog::new(&self.inventory_path)
    }

    /// Receipt writer for the configured directory
    pub fn receipt_writer(&self) -> FileReceiptWriter {
        FileReceiptWriter::new(&self.receipts_dir)
    }

    /// File-backed engine with an empty cart
    pub fn engine(&self) -> TransactionEngine<FileCatalog, FileReceiptWriter> {
        TransactionEngine::new(self.catalog(), self.receipt_writer())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_INVENTORY_FILE, DEFAULT_RECEIPTS_DIR)
    }
}
