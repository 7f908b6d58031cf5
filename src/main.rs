//! lastwill - unified CLI entrypoint.
//!
//! Usage:
//!   lastwill check-config --config config/lastwill.toml
//!   lastwill simulate --clients 100 --will-delay 5 --session-expiry 60

use anyhow::Result;
use clap::Parser;
use lastwill::cli::commands::{run_check_config, run_simulate};
use lastwill::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckConfig(args) => run_check_config(args),
        Commands::Simulate(args) => run_simulate(args).await,
    }
}
