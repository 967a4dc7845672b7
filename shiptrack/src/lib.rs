//! shiptrack - live position tracking for a single vessel
//!
//! Positions come from several third-party tracking sites, tried in a fixed
//! priority order until one answers. When none do, the last recorded position
//! or a configured estimate is used instead, and the result is flagged so it
//! is never mistaken for a live fix. Each resolution can then be turned into
//! a distance from home, the nearest airport, and a travel time estimate.
//!
//! # High-Level API
//!
//! [`tracker::ShipTracker`] is the entry point for most callers:
//!
//! ```ignore
//! use shiptrack::config::ConfigFile;
//! use shiptrack::history::PositionHistory;
//! use shiptrack::provider::build_adapters;
//! use shiptrack::resolver::Resolver;
//! use shiptrack::tracker::ShipTracker;
//!
//! let config = ConfigFile::load()?;
//! let resolver = Resolver::new(
//!     build_adapters(&config.adapter_settings())?,
//!     PositionHistory::load(Box::new(config.history_blob()), config.history.max_entries),
//!     config.reference_point(),
//!     config.estimated_position()?,
//!     config.vessel.name.clone(),
//! );
//! let tracker = ShipTracker::new(resolver, config.vessel.id.clone(), ...);
//! let record = tracker.refresh().await;
//! ```

pub mod airport;
pub mod config;
pub mod extraction;
pub mod geo;
pub mod history;
pub mod logging;
pub mod position;
pub mod provider;
pub mod resolver;
pub mod server;
pub mod tracker;
pub mod travel;

/// Version of the shiptrack library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
