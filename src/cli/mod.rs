//! Command-line interface for folio.

mod commands;

pub use commands::{create_admin, seed};

use clap::{Parser, Subcommand};

/// Folio - personal portfolio backend
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server (default)
    Serve,

    /// Create the admin account, or rotate its password if it exists
    CreateAdmin {
        /// Email for the account; defaults to auth.admin_email from config
        #[arg(long)]
        email: Option<String>,

        /// Display name
        #[arg(long)]
        name: String,

        /// Password (min 8 characters)
        #[arg(long)]
        password: String,
    },

    /// Populate an empty database with sample content for local development
    Seed,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}
