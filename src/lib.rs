#![deny(unused, dead_code)]
#![deny(clippy::all, clippy::pedantic)]
// Module naming: common pattern in domain-driven code
#![allow(clippy::module_name_repetitions)]
// Documentation style: many terms don't need backticks
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
// API ergonomics: prefer simplicity over must_use annotations
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
// Numeric casts: millis and micros fit comfortably in u64
#![allow(clippy::cast_possible_truncation)]
// Passing style
#![allow(clippy::needless_pass_by_value)]
// Control flow style
#![allow(clippy::manual_let_else)]
#![allow(clippy::single_match_else)]

//! lastwill - Will-message delay scheduler for an MQTT broker.
//!
//! # Module Organization
//!
//! ## Core
//! - `core::config` - Configuration parsing and validation
//! - `core::time` - Clock abstraction
//!
//! ## Scheduling
//! - `scheduler` - Pending will table, registration, sweep, recovery
//!
//! ## MQTT
//! - `mqtt::session` - Client session and will records
//! - `mqtt::publish` - Will publish messages and the publish service
//! - `mqtt::metrics` - Published-will counters
//!
//! ## Persistence
//! - `persistence` - Session store seams and the in-memory store
//!
//! ## Operations
//! - `ops::telemetry` - Structured logging
//!
//! ## CLI
//! - `cli` - `lastwill` subcommands

// Core infrastructure
pub mod core;

// Scheduling
pub mod scheduler;

// MQTT types
pub mod mqtt;

// Session stores
pub mod persistence;

// Operations
pub mod ops;

// CLI
pub mod cli;

pub use self::core::{config, time};
pub use ops::telemetry;
pub use scheduler::{PendingWill, PendingWillTable, SchedulerError, SchedulerInputs, SweepReport, WillScheduler};
