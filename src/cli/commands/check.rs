//! Check-config command - loads and validates a configuration file.

use crate::cli::args::CheckConfigArgs;
use crate::config::{env_config_path, Config};
use anyhow::{Context, Result};

pub fn run_check_config(args: CheckConfigArgs) -> Result<()> {
    let (config, path) = match args.config {
        Some(path) => (Config::load(&path)?, path),
        None => (Config::load_from_env()?, env_config_path()),
    };
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    println!(
        "{}: ok (sweep every {} ms, recover_on_start={})",
        path.display(),
        config.scheduler.sweep_interval_ms,
        config.scheduler.recover_on_start
    );
    Ok(())
}
