//! End-to-end integration tests
//!
//! These tests drive a complete register session against real files using
//! predefined fixtures. Each test:
//! 1. Copies inventory.txt from a fixture directory into a temporary store
//! 2. Runs script.txt through a session backed by the file catalog and
//!    receipt writer
//! 3. Compares the session output with expected_output.txt
//! 4. Compares the saved catalog with expected_inventory.txt
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Purchases with per-line rounding
//! - Returns
//! - Catalog maintenance
//! - Rejected operations (bad input, stock limits, unknown commands)
//! - A cart that went stale after the catalog changed

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use pos_inventory_engine::core::TransactionEngine;
    use pos_inventory_engine::io::{FileCatalog, FileReceiptWriter};
    use pos_inventory_engine::session::Session;
    use pos_inventory_engine::types::PosError;
    use rstest::rstest;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn fixture_path(fixture_name: &str, file: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(fixture_name)
            .join(file)
    }

    fn read_fixture(fixture_name: &str, file: &str) -> String {
        let path = fixture_path(fixture_name, file);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
    }

    fn session_in(store: &TempDir) -> Session<FileCatalog, FileReceiptWriter> {
        let engine = TransactionEngine::new(
            FileCatalog::new(store.path().join("inventory.txt")),
            FileReceiptWriter::new(store.path().join("receipts")),
        )
        .with_clock(fixed_clock);
        Session::new(engine)
    }

    fn receipt_files(store: &TempDir) -> Vec<String> {
        let dir = store.path().join("receipts");
        if !dir.exists() {
            return Vec::new();
        }
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Run a fixture's script and compare output, catalog and receipts
    ///
    /// # Panics
    ///
    /// Panics if a fixture file cannot be read, the session fails, or any
    /// result differs from the fixture's expectations.
    fn run_test_fixture(fixture_name: &str, expected_receipts: &[&str]) {
        let store = TempDir::new().expect("Failed to create temp dir");
        fs::write(
            store.path().join("inventory.txt"),
            read_fixture(fixture_name, "inventory.txt"),
        )
        .expect("Failed to seed inventory");

        let script = read_fixture(fixture_name, "script.txt");
        let mut session = session_in(&store);
        let mut output = Vec::new();
        session
            .run(script.as_bytes(), &mut output)
            .unwrap_or_else(|e| panic!("Session failed for fixture {}: {}", fixture_name, e));

        let actual_output = String::from_utf8(output).unwrap();
        let expected_output = read_fixture(fixture_name, "expected_output.txt");
        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );

        let actual_inventory = fs::read_to_string(store.path().join("inventory.txt")).unwrap();
        let expected_inventory = read_fixture(fixture_name, "expected_inventory.txt");
        assert_eq!(
            actual_inventory, expected_inventory,
            "\n\nInventory mismatch for fixture: {}\n",
            fixture_name
        );

        assert_eq!(receipt_files(&store), expected_receipts);
    }

    #[rstest]
    #[case("purchase_flow", &["purchase_2024-05-17_09-30-00.txt"])]
    #[case("return_flow", &["return_2024-05-17_09-30-00.txt"])]
    #[case("maintenance_flow", &[])]
    #[case("rejected_operations", &[])]
    #[case("stale_cart", &["purchase_2024-05-17_09-30-00.txt"])]
    fn test_fixtures(#[case] fixture: &str, #[case] expected_receipts: &[&str]) {
        run_test_fixture(fixture, expected_receipts);
    }

    #[test]
    fn test_purchase_receipt_file_contents() {
        let store = TempDir::new().unwrap();
        fs::write(store.path().join("inventory.txt"), "Pen,101,5.0,10\n").unwrap();

        let mut session = session_in(&store);
        session
            .run("add 101 3\ncheckout\n".as_bytes(), &mut Vec::new())
            .unwrap();

        let receipt_path = store.path().join("receipts/purchase_2024-05-17_09-30-00.txt");
        let receipt = fs::read_to_string(receipt_path).unwrap();
        assert_eq!(
            receipt,
            "Receipt\n-------\nItems:\nPen (101): 5.0 kr, 3 st\nTotal price: 15 kr"
        );
    }

    #[test]
    fn test_missing_inventory_stops_session() {
        let store = TempDir::new().unwrap();
        let mut session = session_in(&store);
        let mut output = Vec::new();

        let result = session.run("add 101 1\ncart\n".as_bytes(), &mut output);

        match result {
            Err(e @ PosError::CatalogNotFound { .. }) => {
                assert!(e.is_fatal());
                assert!(e.to_string().starts_with("File "));
                assert!(e.to_string().ends_with("inventory.txt not found"));
            }
            other => panic!("expected CatalogNotFound, got {:?}", other),
        }
        assert!(output.is_empty());
        assert!(!store.path().join("inventory.txt").exists());
    }

    #[test]
    fn test_malformed_inventory_is_fatal_and_untouched() {
        let store = TempDir::new().unwrap();
        let original = "Pen,101,5.0,10\nEraser,202,cheap,4\n";
        fs::write(store.path().join("inventory.txt"), original).unwrap();

        let mut session = session_in(&store);
        let result = session.run("return 101 1\n".as_bytes(), &mut Vec::new());

        assert!(matches!(
            result,
            Err(PosError::MalformedRecord { line: Some(2), .. })
        ));
        assert_eq!(
            fs::read_to_string(store.path().join("inventory.txt")).unwrap(),
            original
        );
        assert!(receipt_files(&store).is_empty());
    }

    #[test]
    fn test_unwritable_receipt_dir_keeps_purchase() {
        let store = TempDir::new().unwrap();
        fs::write(store.path().join("inventory.txt"), "Pen,101,5.0,10\n").unwrap();
        fs::write(store.path().join("receipts"), "not a directory").unwrap();

        let mut session = session_in(&store);
        let mut output = Vec::new();
        let stats = session
            .run("add 101 2\ncheckout\n".as_bytes(), &mut output)
            .unwrap();

        assert_eq!(stats.rejected, 0);
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("Total price: 10 kr\n\nReceipt not saved"));
        assert_eq!(
            fs::read_to_string(store.path().join("inventory.txt")).unwrap(),
            "Pen,101,5.0,8\n"
        );
    }

    #[test]
    fn test_unwritable_receipt_dir_aborts_return() {
        let store = TempDir::new().unwrap();
        fs::write(store.path().join("inventory.txt"), "Pen,101,5.0,10\n").unwrap();
        fs::write(store.path().join("receipts"), "not a directory").unwrap();

        let mut session = session_in(&store);
        let result = session.run("return 101 2\n".as_bytes(), &mut Vec::new());

        assert!(matches!(result, Err(PosError::ReceiptWrite { .. })));
        assert_eq!(
            fs::read_to_string(store.path().join("inventory.txt")).unwrap(),
            "Pen,101,5.0,10\n"
        );
    }
}
