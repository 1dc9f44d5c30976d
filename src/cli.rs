// CLI module for handling command-line interface

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pkgfolio")]
#[command(about = "Browse a portfolio of npm packages from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty packages.toml
    Init,
    /// Add a package to the portfolio
    Add {
        name: String,
        /// Skip the registry lookup
        #[arg(long)]
        no_verify: bool,
    },
    /// Remove a package from the portfolio
    Remove { name: String },
    /// List package cards, optionally filtered by a search query
    List {
        query: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show the detail view of one package
    Show {
        /// Package name or id
        name: String,
        /// Print the README markdown
        #[arg(long)]
        readme: bool,
        #[arg(long)]
        json: bool,
    },
}
