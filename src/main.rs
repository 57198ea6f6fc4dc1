//! Point-of-Sale Inventory Engine CLI
//!
//! Command-line front end for the shop register: catalog maintenance,
//! one-shot sales and returns, and scripted or interactive sessions.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- inventory
//! cargo run -- sell 101:3 202:1
//! cargo run -- return --id 101 --quantity 2
//! cargo run -- add-product --name Eraser --id 202 --price 2.5 --quantity 0
//! cargo run -- --inventory shop.txt --receipts out session --script day.txt
//! ```
//!
//! Statuses go to stdout. Logs go to stderr; set `RUST_LOG` or pass `-v`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (catalog missing or unreadable, return receipt not saved)
//! - 2: Operation rejected (bad input, unknown product, not enough stock)

use pos_inventory_engine::cli::{self, Command};
use pos_inventory_engine::config::StoreConfig;
use pos_inventory_engine::core::InventoryManager;
use pos_inventory_engine::session::Session;
use pos_inventory_engine::types::PosError;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run(command: Command, config: &StoreConfig) -> Result<String, PosError> {
    match command {
        Command::Inventory => {
            let inventory = InventoryManager::new(config.catalog());
            Ok(inventory.view_inventory()?.to_string())
        }
        Command::AddProduct {
            name,
            id,
            price,
            quantity,
        } => {
            let mut inventory = InventoryManager::new(config.catalog());
            Ok(inventory
                .add_product(&name, &id, &price, &quantity)?
                .to_string())
        }
        Command::UpdateProduct {
            id,
            price,
            quantity,
        } => {
            let mut inventory = InventoryManager::new(config.catalog());
            Ok(inventory.update_product(&id, &price, &quantity)?.to_string())
        }
        Command::DeleteProduct { id } => {
            let mut inventory = InventoryManager::new(config.catalog());
            Ok(inventory.delete_product(&id)?.to_string())
        }
        Command::Return { id, quantity } => {
            let mut engine = config.engine();
            Ok(engine.return_item(&id, &quantity)?.to_string())
        }
        Command::Sell { items } => {
            // Confirmations are written as items are added, before any error
            let mut session = Session::new(config.engine());
            session.sell(&items, &mut io::stdout().lock())?;
            Ok(String::new())
        }
        Command::Session { script } => {
            let mut session = Session::new(config.engine());
            let mut output = io::stdout().lock();
            let stats = match script {
                Some(path) => {
                    let file = File::open(&path).map_err(|e| PosError::IoError {
                        message: format!("{}: {}", path.display(), e),
                    })?;
                    session.run(BufReader::new(file), &mut output)?
                }
                None => session.run(io::stdin().lock(), &mut output)?,
            };
            info!(
                executed = stats.executed,
                rejected = stats.rejected,
                "session finished"
            );
            Ok(String::new())
        }
    }
}

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    init_logging(args.verbose);

    let config = args.to_store_config();
    info!(
        inventory = %config.inventory_path.display(),
        receipts = %config.receipts_dir.display(),
        "starting"
    );

    match run(args.command, &config) {
        Ok(status) => {
            if !status.is_empty() {
                println!("{}", status);
            }
        }
        Err(e) if e.is_fatal() => {
            error!(error = %e, "fatal error");
            eprintln!("{}\nProgram stopped!", e);
            process::exit(1);
        }
        Err(e) => {
            println!("{}", e);
            process::exit(2);
        }
    }
}
