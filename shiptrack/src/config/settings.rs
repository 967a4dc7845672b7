//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::provider::ProviderKind;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub vessel: VesselSettings,
    pub home: HomeSettings,
    pub fallback: FallbackSettings,
    pub providers: ProvidersSettings,
    pub history: HistorySettings,
    pub travel: TravelSection,
    pub facilities: FacilitiesSettings,
    pub watch: WatchSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// The tracked vessel.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselSettings {
    /// MMSI used as the target id.
    pub id: String,
    /// Display name, also used by name-based searches.
    pub name: String,
}

/// Reference point distances are measured from.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSettings {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Position returned when no provider answers and there is no history.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackSettings {
    pub latitude: f64,
    pub longitude: f64,
    pub status: String,
}

/// Provider chain settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvidersSettings {
    /// Priority order.
    pub order: Vec<ProviderKind>,
    /// Per-request timeout in seconds.
    pub timeout: u64,
    pub user_agent: String,
}

/// Position history persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySettings {
    pub directory: PathBuf,
    pub key: String,
    pub max_entries: usize,
}

/// Travel estimate parameters (`[travel]`).
#[derive(Debug, Clone, PartialEq)]
pub struct TravelSection {
    pub origin: String,
    pub origin_city: String,
    pub transfer_minutes: u32,
    pub ground_speed_mph: f64,
}

/// Airport table source.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilitiesSettings {
    /// Airport list file; the built-in table when unset.
    pub file: Option<PathBuf>,
}

/// Periodic refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchSettings {
    /// Seconds between refreshes.
    pub interval: u64,
    /// Seconds before retrying after a non-live result.
    pub retry: u64,
}

/// HTTP endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    /// Serve last-known and estimated records instead of 404.
    pub serve_fallback: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
