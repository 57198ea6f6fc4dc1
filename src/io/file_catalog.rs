//! File-backed catalog repository
//!
//! Reads and rewrites the whole catalog file on every call. Saving truncates
//! and rewrites in place with no backup, so a crash mid-write can leave a
//! partial file behind.

use crate::core::{Catalog, CatalogRepository};
use crate::io::catalog_format::{read_catalog, write_catalog};
use crate::types::PosError;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Catalog stored in a flat text file
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Repository for the catalog file at `path`
    ///
    /// The file is not opened until the first `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCatalog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogRepository for FileCatalog {
    fn load(&self) -> Result<Catalog, PosError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PosError::CatalogNotFound {
                path: self.path.display().to_string(),
            },
            _ => PosError::IoError {
                message: format!("Failed to open '{}': {}", self.path.display(), e),
            },
        })?;

        let catalog = read_catalog(BufReader::new(file))?;
        debug!(path = %self.path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    fn save(&mut self, catalog: &Catalog) -> Result<(), PosError> {
        let file = File::create(&self.path).map_err(|e| PosError::IoError {
            message: format!("Failed to create '{}': {}", self.path.display(), e),
        })?;

        let mut writer = BufWriter::new(file);
        write_catalog(catalog, &mut writer)?;
        writer.flush()?;

        debug!(path = %self.path.display(), products = catalog.len(), "catalog saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::TempDir;

    fn catalog_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("inventory.txt");
        fs::write(&path, content).expect("Failed to write catalog file");
        path
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        let repo = FileCatalog::new(catalog_file(&dir, "Pen,101,5.0,10\n"));

        let catalog = repo.load().unwrap();

        assert_eq!(catalog.get("101").unwrap().quantity, 10);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        let repo = FileCatalog::new(&path);

        let error = repo.load().unwrap_err();

        assert_eq!(
            error,
            PosError::CatalogNotFound {
                path: path.display().to_string()
            }
        );
        assert!(error.is_fatal());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let repo = FileCatalog::new(catalog_file(&dir, "Pen,101\n"));
        assert!(matches!(
            repo.load(),
            Err(PosError::MalformedRecord { line: Some(1), .. })
        ));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = catalog_file(&dir, "Pen,101,5.0,10\nEraser,202,2.5,4\n");
        let mut repo = FileCatalog::new(&path);

        let mut catalog = repo.load().unwrap();
        catalog.get_mut("101").unwrap().quantity = 7;
        catalog.upsert(Product::new("Ruler", "303", Decimal::new(12, 0), 1));
        repo.save(&catalog).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Pen,101,5.0,7\nEraser,202,2.5,4\nRuler,303,12.0,1\n"
        );
        assert_eq!(repo.load().unwrap(), catalog);
    }

    #[test]
    fn test_save_truncates_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = catalog_file(&dir, "Pen,101,5.0,10\nEraser,202,2.5,4\n");
        let mut repo = FileCatalog::new(&path);

        let mut catalog = repo.load().unwrap();
        catalog.remove("202");
        repo.save(&catalog).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Pen,101,5.0,10\n");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let mut repo = FileCatalog::new(dir.path().join("no/such/dir/inventory.txt"));
        let result = repo.save(&Catalog::new());
        assert!(matches!(result, Err(PosError::IoError { .. })));
    }
}
