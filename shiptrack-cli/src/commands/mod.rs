//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`history`] - Inspect or clear the position history
//! - [`resolve`] - Resolve the vessel once and print the result
//! - [`serve`] - Run the HTTP endpoint
//! - [`watch`] - Refresh periodically until interrupted

pub mod common;
pub mod config;
pub mod history;
pub mod resolve;
pub mod serve;
pub mod watch;
