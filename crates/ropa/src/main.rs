//! Ropa CLI - wardrobe assistant that tags clothing photos with a vision
//! language model and answers questions about them.
//!
//! # Usage
//!
//! ```bash
//! # Start an interactive session (asks for the password first)
//! ropa
//!
//! # View configuration
//! ropa config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Ropa - tag your clothes with AI and ask what to wear.
#[derive(Parser, Debug)]
#[command(name = "ropa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "ROPA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match cli::config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `ropa config path`."
            );
            ropa_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Ropa v{}", ropa_core::VERSION);

    match cli.command {
        Some(Commands::Config(args)) => cli::config::execute(args, cli.config.as_deref()),
        None => cli::session::run(&config).await,
    }
}
