//! Localprice CLI - selection curation and conversion runs.
//!
//! # Usage
//!
//! ```bash
//! # Curate the selection list
//! lp-cli selection search mo
//! lp-cli selection add "Morocco"
//! lp-cli selection move 2 0
//! lp-cli selection list
//!
//! # Store the gateway auth token
//! lp-cli token set <TOKEN>
//!
//! # Run a conversion against a page snapshot
//! lp-cli convert --page page.json
//! ```
//!
//! # Commands
//!
//! - `selection` - Search the catalog and edit the curated list
//! - `token` - Manage the gateway auth token slot
//! - `convert` - Run the conversion workflow once against a page snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]
// Operator-facing command output goes to stdout by design.
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lp-cli")]
#[command(author, version, about = "Localprice CLI tools")]
struct Cli {
    /// Directory holding the selection list and durable store files.
    #[arg(long, default_value = ".localprice", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and edit the curated selection list
    Selection {
        #[command(subcommand)]
        action: SelectionAction,
    },
    /// Manage the gateway auth token slot
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Run the conversion workflow once against a page snapshot
    Convert {
        /// Page snapshot file (JSON: prices, currencyLabels, baseCurrency)
        #[arg(long)]
        page: PathBuf,
    },
}

#[derive(Subcommand)]
enum SelectionAction {
    /// Print the curated list in operator order
    List,
    /// Search the catalog by country-name prefix
    Search {
        /// Country-name prefix (empty matches everything)
        #[arg(default_value = "")]
        query: String,
    },
    /// Add a catalog country to the curated list
    Add {
        /// Country name as it appears in the catalog
        country: String,
    },
    /// Remove a country from the curated list
    Remove {
        /// Country name
        country: String,
    },
    /// Select every catalog country
    SelectAll,
    /// Empty the curated list
    Clear,
    /// Move an entry to a new position (zero-based)
    Move {
        /// Current position
        from: usize,
        /// Target position
        to: usize,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Store the gateway auth token
    Set {
        /// Token value issued by the gateway
        token: String,
    },
    /// Delete the stored token
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&cli.data_dir)?;

    match cli.command {
        Commands::Selection { action } => match action {
            SelectionAction::List => commands::selection::list(&cli.data_dir)?,
            SelectionAction::Search { query } => commands::selection::search(&query),
            SelectionAction::Add { country } => commands::selection::add(&cli.data_dir, &country)?,
            SelectionAction::Remove { country } => {
                commands::selection::remove(&cli.data_dir, &country)?;
            }
            SelectionAction::SelectAll => commands::selection::select_all(&cli.data_dir)?,
            SelectionAction::Clear => commands::selection::clear(&cli.data_dir)?,
            SelectionAction::Move { from, to } => {
                commands::selection::move_entry(&cli.data_dir, from, to)?;
            }
        },
        Commands::Token { action } => match action {
            TokenAction::Set { token } => commands::token::set(&cli.data_dir, &token)?,
            TokenAction::Clear => commands::token::clear(&cli.data_dir)?,
        },
        Commands::Convert { page } => commands::convert::run(&cli.data_dir, &page).await?,
    }
    Ok(())
}
