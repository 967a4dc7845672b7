//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let order = config
        .providers
        .order
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let facilities_file = config
        .facilities
        .file
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[vessel]
; MMSI of the tracked vessel
id = {}
; Display name (also used for name searches)
name = {}

[home]
; Reference point for distance calculations
label = {}
latitude = {}
longitude = {}

[fallback]
; Position reported when no provider answers and there is no history.
; Records built from it are flagged as estimated.
latitude = {}
longitude = {}
status = {}

[providers]
; Providers tried in order, first success wins:
;   myshiptracking      - MyShipTracking vessel page (scraped)
;   vesselfinder        - VesselFinder click API (JSON, via CORS proxy)
;   marinetraffic       - MarineTraffic details page (scraped, via CORS proxy)
;   vesselfinder_search - VesselFinder name search (scraped, via CORS proxy)
order = {}
; Per-request timeout in seconds
timeout = {}
user_agent = {}

[history]
; History is stored as <directory>/<key>.json
directory = {}
key = {}
; Number of positions kept (oldest dropped first)
max_entries = {}

[travel]
; Origin airport code and city used for flight estimates and searches
origin = {}
origin_city = {}
; Minutes from home to the origin airport
transfer_minutes = {}
; Average speed from the destination airport to the vessel
ground_speed_mph = {}

[facilities]
; Airport list file, one "code,name,latitude,longitude,city" per line.
; If empty, the built-in airport list is used.
file = {}

[watch]
; Seconds between refreshes (default: 1800)
interval = {}
; Seconds before retrying when no live position was found (default: 30)
retry = {}

[server]
bind = {}
; Serve last-known and estimated positions (false answers 404 instead)
serve_fallback = {}

[logging]
file = {}
"#,
        config.vessel.id,
        config.vessel.name,
        config.home.label,
        config.home.latitude,
        config.home.longitude,
        config.fallback.latitude,
        config.fallback.longitude,
        config.fallback.status,
        order,
        config.providers.timeout,
        config.providers.user_agent,
        path_to_string(&config.history.directory),
        config.history.key,
        config.history.max_entries,
        config.travel.origin,
        config.travel.origin_city,
        config.travel.transfer_minutes,
        config.travel.ground_speed_mph,
        facilities_file,
        config.watch.interval,
        config.watch.retry,
        config.server.bind,
        config.server.serve_fallback,
        path_to_string(&config.logging.file),
    )
}

/// Convert a path to a string, replacing home directory with ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
