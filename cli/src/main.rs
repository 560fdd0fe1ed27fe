use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;
mod session;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // An unloadable config is reported by the command itself.
    let level = session::load_config(&cli.global)
        .map(|config| config.observability.log_level)
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let global = &cli.global;
    match cli.command {
        Commands::List(args) => commands::list::run(global, args).await,
        Commands::Add(args) => commands::add::run(global, args).await,
        Commands::Edit(args) => commands::edit::run(global, args).await,
        Commands::Remove(args) => commands::remove::run(global, args).await,
        Commands::Refresh(args) => commands::refresh::run(global, args).await,
        Commands::Suggest(args) => commands::suggest::run(global, args).await,
        Commands::Banner => commands::banner::run(global).await,
        Commands::Status => commands::status::run(global).await
    }
}
