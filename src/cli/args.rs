//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// lastwill - MQTT will-message delay scheduler.
#[derive(Parser)]
#[command(name = "lastwill")]
#[command(version)]
#[command(about = "Will-message delay scheduler and diagnostic tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate a configuration file
    CheckConfig(CheckConfigArgs),

    /// Register wills for simulated clients and run sweeps until all have fired
    Simulate(SimulateArgs),
}

#[derive(Args)]
pub struct CheckConfigArgs {
    /// Path to configuration file; falls back to LASTWILL_CONFIG, then
    /// `config/lastwill.toml`, with environment overrides applied
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Optional configuration file; defaults apply when absent
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of simulated clients disconnecting at once
    #[arg(long, default_value_t = 10)]
    pub clients: u32,

    /// Will delay interval in seconds
    #[arg(long, default_value_t = 2)]
    pub will_delay: u32,

    /// Session expiry interval in seconds
    #[arg(long, default_value_t = 60)]
    pub session_expiry: u32,

    /// Give up after this many seconds
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,
}
