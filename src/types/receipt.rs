//! Receipts for settled purchases and returns

use super::error::PosError;
use super::product::Product;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;

/// Timestamp layout used in receipt file names
pub const RECEIPT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Whether a receipt records money taken or money paid back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptKind {
    Purchase,
    Return,
}

impl ReceiptKind {
    /// Prefix used for the receipt file name
    pub fn file_prefix(self) -> &'static str {
        match self {
            ReceiptKind::Purchase => "purchase",
            ReceiptKind::Return => "return",
        }
    }

    fn total_label(self) -> &'static str {
        match self {
            ReceiptKind::Purchase => "Total price",
            ReceiptKind::Return => "Money returned",
        }
    }
}

/// An immutable record of one settled transaction
///
/// Lines keep the order in which they were added to the cart. The total is
/// computed once at construction so rendering cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    kind: ReceiptKind,
    lines: Vec<Product>,
    total: Decimal,
    issued_at: NaiveDateTime,
}

impl Receipt {
    /// Build a receipt from its lines
    ///
    /// # Errors
    ///
    /// Returns `TotalOverflow` if a line total cannot be represented.
    pub fn new(
        kind: ReceiptKind,
        lines: Vec<Product>,
        issued_at: NaiveDateTime,
    ) -> Result<Self, PosError> {
        let mut total = Decimal::ZERO;
        for line in &lines {
            let line_total = line.line_total()?;
            total = total
                .checked_add(line_total)
                .ok_or_else(|| PosError::TotalOverflow {
                    id: line.id.clone(),
                })?;
        }

        Ok(Receipt {
            kind,
            lines,
            total,
            issued_at,
        })
    }

    pub fn kind(&self) -> ReceiptKind {
        self.kind
    }

    pub fn lines(&self) -> &[Product] {
        &self.lines
    }

    /// Sum of the per-line totals, each rounded to whole kronor first
    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn issued_at(&self) -> NaiveDateTime {
        self.issued_at
    }

    /// File name this receipt is stored under, e.g. `purchase_2024-01-31_14-05-09.txt`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.txt",
            self.kind.file_prefix(),
            self.issued_at.format(RECEIPT_TIMESTAMP_FORMAT)
        )
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Receipt\n-------\nItems:\n")?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        write!(f, "{}: {} kr", self.kind.total_label(), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use std::str::FromStr;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    fn line(name: &str, id: &str, price: &str, quantity: u32) -> Product {
        Product::new(name, id, Decimal::from_str(price).unwrap(), quantity)
    }

    #[test]
    fn test_purchase_rendering() {
        let receipt = Receipt::new(
            ReceiptKind::Purchase,
            vec![line("Pen", "101", "5.0", 3)],
            timestamp(),
        )
        .unwrap();

        assert_eq!(
            receipt.to_string(),
            "Receipt\n-------\nItems:\nPen (101): 5.0 kr, 3 st\nTotal price: 15 kr"
        );
    }

    #[test]
    fn test_return_rendering() {
        let receipt = Receipt::new(
            ReceiptKind::Return,
            vec![line("Eraser", "202", "2.5", 2)],
            timestamp(),
        )
        .unwrap();

        assert_eq!(
            receipt.to_string(),
            "Receipt\n-------\nItems:\nEraser (202): 2.5 kr, 2 st\nMoney returned: 5 kr"
        );
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let receipt = Receipt::new(
            ReceiptKind::Purchase,
            vec![line("Zebra", "9", "1.0", 1), line("Apple", "1", "1.0", 1)],
            timestamp(),
        )
        .unwrap();

        let text = receipt.to_string();
        assert!(text.find("Zebra").unwrap() < text.find("Apple").unwrap());
    }

    #[rstest]
    // Each line rounds separately: 2.5 -> 2 and 2.5 -> 2, not 5.0 -> 5
    #[case::rounded_per_line(vec![("2.5", 1), ("2.5", 1)], "4")]
    #[case::half_to_even(vec![("2.5", 1), ("3.5", 1)], "6")]
    #[case::mixed(vec![("5.0", 3), ("1.25", 2), ("0.4", 1)], "17")]
    #[case::single(vec![("19.99", 1)], "20")]
    fn test_total_rounds_each_line_before_summing(
        #[case] lines: Vec<(&str, u32)>,
        #[case] expected: &str,
    ) {
        let lines = lines
            .into_iter()
            .enumerate()
            .map(|(i, (price, qty))| line("Item", &i.to_string(), price, qty))
            .collect();
        let receipt = Receipt::new(ReceiptKind::Purchase, lines, timestamp()).unwrap();
        assert_eq!(receipt.total().to_string(), expected);
    }

    #[rstest]
    #[case(ReceiptKind::Purchase, "purchase_2024-01-31_14-05-09.txt")]
    #[case(ReceiptKind::Return, "return_2024-01-31_14-05-09.txt")]
    fn test_file_name(#[case] kind: ReceiptKind, #[case] expected: &str) {
        let receipt = Receipt::new(kind, vec![line("Pen", "101", "5.0", 1)], timestamp()).unwrap();
        assert_eq!(receipt.file_name(), expected);
    }
}
