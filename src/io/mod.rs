//! I/O module
//!
//! Handles the catalog file and receipt files.
//!
//! # Components
//!
//! - `catalog_format` - Flat catalog format (record conversion, serialization)
//! - `file_catalog` - Catalog repository backed by a file
//! - `receipt_writer` - Receipt sink writing one text file per receipt

pub mod catalog_format;
pub mod file_catalog;
pub mod receipt_writer;

pub use catalog_format::{convert_catalog_record, read_catalog, write_catalog, CatalogRecord};
pub use file_catalog::FileCatalog;
pub use receipt_writer::FileReceiptWriter;
