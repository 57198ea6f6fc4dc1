use crate::config::{StoreConfig, DEFAULT_INVENTORY_FILE, DEFAULT_RECEIPTS_DIR};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Point-of-sale inventory and transaction manager
#[derive(Parser, Debug)]
#[command(name = "pos")]
#[command(about = "Point-of-sale inventory and transaction manager", long_about = None)]
pub struct CliArgs {
    /// Catalog file with one `name,id,price,quantity` record per line
    #[arg(
        long = "inventory",
        value_name = "PATH",
        global = true,
        help = "Path to the inventory file (default: inventory.txt)"
    )]
    pub inventory: Option<PathBuf>,

    /// Directory receipts are written into
    #[arg(
        long = "receipts",
        value_name = "DIR",
        global = true,
        help = "Directory for receipt files (default: receipts)"
    )]
    pub receipts: Option<PathBuf>,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations available from the command line
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every product in the inventory
    Inventory,

    /// Add a product, replacing any product with the same id
    AddProduct {
        #[arg(long)]
        name: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        quantity: String,
    },

    /// Set a new price and quantity on an existing product
    UpdateProduct {
        #[arg(long)]
        id: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        quantity: String,
    },

    /// Remove a product from the inventory
    DeleteProduct {
        #[arg(long)]
        id: String,
    },

    /// Take a product back and issue a return receipt
    Return {
        #[arg(long)]
        id: String,
        #[arg(long)]
        quantity: String,
    },

    /// Sell items in one checkout, each given as ID:QTY
    Sell {
        #[arg(value_name = "ID:QTY", required = true)]
        items: Vec<String>,
    },

    /// Run a register session reading commands from a script or stdin
    Session {
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,
    },
}

impl CliArgs {
    /// Create a StoreConfig from CLI arguments
    ///
    /// Locations not given on the command line fall back to the defaults.
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig::new(
            self.inventory
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INVENTORY_FILE)),
            self.receipts
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RECEIPTS_DIR)),
        )
    }
}
