mod cli;
mod commands;
mod config;
mod constants;
mod detail;
mod display;
mod filter;
mod manifest;
mod pipeline;
mod registry;
mod session;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::init(),
        Commands::Add { name, no_verify } => commands::add::add(name, no_verify).await,
        Commands::Remove { name } => commands::remove::remove(name),
        Commands::List { query, json } => commands::list::list(query, json).await,
        Commands::Show { name, readme, json } => commands::show::show(name, readme, json).await,
    };

    if let Err(e) = result {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
