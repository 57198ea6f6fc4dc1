//! Receipt files
//!
//! Each receipt is written as plain text to its own file inside the receipts
//! directory, named after its kind and timestamp (see
//! [`Receipt::file_name`]). The directory is created on first use. Two
//! receipts of the same kind within one second share a name, and the later
//! one overwrites the earlier.

use crate::core::ReceiptSink;
use crate::types::{PosError, Receipt};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes receipts into a directory
#[derive(Debug, Clone)]
pub struct FileReceiptWriter {
    dir: PathBuf,
}

impl FileReceiptWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileReceiptWriter { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReceiptSink for FileReceiptWriter {
    fn persist(&mut self, receipt: &Receipt) -> Result<PathBuf, PosError> {
        let path = self.dir.join(receipt.file_name());
        let write_error = |e: std::io::Error| PosError::ReceiptWrite {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(write_error)?;
        fs::write(&path, receipt.to_string()).map_err(write_error)?;

        debug!(path = %path.display(), "receipt written");
        Ok(path)
    }
}
