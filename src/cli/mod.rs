//! lastwill CLI - unified command-line interface.
//!
//! - `lastwill check-config` - Validate a configuration file
//! - `lastwill simulate` - Drive the scheduler against an in-memory session store

mod args;
pub mod commands;

pub use args::{CheckConfigArgs, Cli, Commands, SimulateArgs};
