//! Core infrastructure.
//!
//! - `config` - Configuration parsing and validation
//! - `time` - Clock abstraction for wall and monotonic time

pub mod config;
pub mod time;

pub use config::*;
pub use time::*;
