//! CLI command implementations.

mod check;
mod simulate;

pub use check::run_check_config;
pub use simulate::run_simulate;
