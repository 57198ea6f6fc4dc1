//! Register session
//!
//! Drives a [`TransactionEngine`] and an [`InventoryManager`] from a stream of
//! operator commands, writing one status block per command to the output.
//! This is the text-mode stand-in for the register's screen: it calls into
//! the engine and prints whatever status comes back.
//!
//! # Error Handling
//!
//! - Recoverable errors (bad input, unknown product, empty cart, unknown
//!   command) are written as the command's status and the session continues
//! - Fatal errors (missing or corrupt catalog, failed return receipt) end the
//!   session and are returned to the caller

pub mod command;

pub use command::{parse_sale_item, CommandReader, SessionCommand};

use crate::core::{CatalogRepository, InventoryManager, ReceiptSink, TransactionEngine};
use crate::types::PosError;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Counters for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Commands that completed successfully
    pub executed: usize,
    /// Commands answered with a recoverable error status
    pub rejected: usize,
}

/// A register session: the engine with its cart plus catalog maintenance
///
/// Maintenance commands run through an [`InventoryManager`] borrowing the
/// engine's own repository, so both sides always see the same catalog.
pub struct Session<C, R> {
    engine: TransactionEngine<C, R>,
}

impl<C: CatalogRepository, R: ReceiptSink> Session<C, R> {
    pub fn new(engine: TransactionEngine<C, R>) -> Self {
        Session { engine }
    }

    pub fn engine(&self) -> &TransactionEngine<C, R> {
        &self.engine
    }

    fn inventory(&mut self) -> InventoryManager<&mut C> {
        InventoryManager::new(self.engine.catalog_repository_mut())
    }

    /// Run one command and return its status text
    ///
    /// # Errors
    ///
    /// Returns the engine's error unchanged; the caller decides whether it is
    /// fatal.
    pub fn execute(&mut self, command: SessionCommand) -> Result<String, PosError> {
        let status = match command {
            SessionCommand::Add { id, quantity } => {
                self.engine.add_to_cart(&id, &quantity)?.to_string()
            }
            SessionCommand::Remove { id, quantity } => {
                self.engine.remove_from_cart(&id, &quantity)?.to_string()
            }
            SessionCommand::ShowCart => self.engine.cart().to_string(),
            SessionCommand::Checkout => self.engine.checkout()?.to_string(),
            SessionCommand::Clear => {
                self.engine.clear_cart();
                "Shopping cart cleared".to_string()
            }
            SessionCommand::Return { id, quantity } => {
                self.engine.return_item(&id, &quantity)?.to_string()
            }
            SessionCommand::Inventory => self.inventory().view_inventory()?.to_string(),
            SessionCommand::NewProduct {
                id,
                price,
                quantity,
                name,
            } => self
                .inventory()
                .add_product(&name, &id, &price, &quantity)?
                .to_string(),
            SessionCommand::Update {
                id,
                price,
                quantity,
            } => self
                .inventory()
                .update_product(&id, &price, &quantity)?
                .to_string(),
            SessionCommand::Delete { id } => self.inventory().delete_product(&id)?.to_string(),
            SessionCommand::Quit => "Bye".to_string(),
        };
        Ok(status)
    }

    /// Sell `ID:QTY` items in a single checkout, writing each status to `output`
    ///
    /// Items are added to the cart in order and the cart is then settled. A
    /// rejected item stops the sale before checkout: the confirmations for
    /// the items already added stay in `output`, nothing is saved, and the
    /// error is returned for the caller to report.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` for an item not of the form `ID:QTY`, otherwise the
    /// engine's error for the first rejected item or for the checkout.
    pub fn sell<W: Write>(&mut self, items: &[String], output: &mut W) -> Result<(), PosError> {
        for item in items {
            let (id, quantity) =
                parse_sale_item(item).ok_or_else(|| PosError::invalid_quantity(item))?;
            let update = self.engine.add_to_cart(id, quantity)?;
            writeln!(output, "{}\n", update)?;
        }

        let settlement = self.engine.checkout()?;
        writeln!(output, "{}", settlement)?;
        output.flush()?;
        Ok(())
    }

    /// Run every command from `input`, writing statuses to `output`
    ///
    /// Stops at the end of input or at `quit`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error, or an I/O error if `output` cannot be
    /// written. Statuses written before the error stay in `output`.
    pub fn run<B: BufRead, W: Write>(
        &mut self,
        input: B,
        output: &mut W,
    ) -> Result<SessionStats, PosError> {
        let mut stats = SessionStats::default();

        for (line_num, parsed) in CommandReader::new(input) {
            let result = parsed.and_then(|command| {
                let quit = command == SessionCommand::Quit;
                self.execute(command).map(|status| (status, quit))
            });

            match result {
                Ok((status, quit)) => {
                    stats.executed += 1;
                    writeln!(output, "{}\n", status)?;
                    if quit {
                        break;
                    }
                }
                Err(e) if e.is_fatal() => {
                    warn!(line = line_num, error = %e, "session stopped");
                    return Err(e);
                }
                Err(e) => {
                    debug!(line = line_num, error = %e, "command rejected");
                    stats.rejected += 1;
                    writeln!(output, "{}\n", e)?;
                }
            }
        }

        output.flush()?;
        Ok(stats)
    }
}
