//! Default values and constants for all configuration settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::file::config_directory;
use super::settings::*;
use crate::history::{DEFAULT_HISTORY_KEY, DEFAULT_MAX_ENTRIES};
use crate::provider::{ProviderKind, DEFAULT_PROVIDER_TIMEOUT, DEFAULT_USER_AGENT};
use crate::resolver::{DEFAULT_ESTIMATE, DEFAULT_ESTIMATE_STATUS};
use crate::travel::{
    DEFAULT_GROUND_SPEED_MPH, DEFAULT_ORIGIN, DEFAULT_ORIGIN_CITY, DEFAULT_TRANSFER_MINUTES,
};

/// Default vessel MMSI.
pub const DEFAULT_VESSEL_ID: &str = "235109357";

/// Default vessel display name.
pub const DEFAULT_VESSEL_NAME: &str = "RFA TIDESPRING";

pub const DEFAULT_HOME_LABEL: &str = "Home";
pub const DEFAULT_HOME_LATITUDE: f64 = 51.4816;
pub const DEFAULT_HOME_LONGITUDE: f64 = -0.1297;

/// Default refresh interval (30 minutes).
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 30 * 60;

/// Default retry delay after a non-live result.
pub const DEFAULT_WATCH_RETRY_SECS: u64 = 30;

pub const DEFAULT_SERVER_PORT: u16 = 8787;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "shiptrack.log";

impl Default for ConfigFile {
    fn default() -> Self {
        let dir = config_directory();

        Self {
            vessel: VesselSettings {
                id: DEFAULT_VESSEL_ID.to_string(),
                name: DEFAULT_VESSEL_NAME.to_string(),
            },
            home: HomeSettings {
                label: DEFAULT_HOME_LABEL.to_string(),
                latitude: DEFAULT_HOME_LATITUDE,
                longitude: DEFAULT_HOME_LONGITUDE,
            },
            fallback: FallbackSettings {
                latitude: DEFAULT_ESTIMATE.latitude,
                longitude: DEFAULT_ESTIMATE.longitude,
                status: DEFAULT_ESTIMATE_STATUS.to_string(),
            },
            providers: ProvidersSettings {
                order: ProviderKind::default_order(),
                timeout: DEFAULT_PROVIDER_TIMEOUT.as_secs(),
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            history: HistorySettings {
                directory: dir.clone(),
                key: DEFAULT_HISTORY_KEY.to_string(),
                max_entries: DEFAULT_MAX_ENTRIES,
            },
            travel: TravelSection {
                origin: DEFAULT_ORIGIN.to_string(),
                origin_city: DEFAULT_ORIGIN_CITY.to_string(),
                transfer_minutes: DEFAULT_TRANSFER_MINUTES,
                ground_speed_mph: DEFAULT_GROUND_SPEED_MPH,
            },
            facilities: FacilitiesSettings { file: None },
            watch: WatchSettings {
                interval: DEFAULT_WATCH_INTERVAL_SECS,
                retry: DEFAULT_WATCH_RETRY_SECS,
            },
            server: ServerSettings {
                bind: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_SERVER_PORT),
                serve_fallback: true,
            },
            logging: LoggingSettings {
                file: dir.join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
