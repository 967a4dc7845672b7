//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::geo::{is_valid_latitude, is_valid_longitude};
use crate::provider::ProviderKind;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [vessel] section
    if let Some(section) = ini.section(Some("vessel")) {
        if let Some(v) = non_empty(section, "id") {
            config.vessel.id = v.to_string();
        }
        if let Some(v) = non_empty(section, "name") {
            config.vessel.name = v.to_string();
        }
    }

    // [home] section
    if let Some(section) = ini.section(Some("home")) {
        if let Some(v) = non_empty(section, "label") {
            config.home.label = v.to_string();
        }
        if let Some(v) = section.get("latitude") {
            config.home.latitude = parse_latitude("home", v)?;
        }
        if let Some(v) = section.get("longitude") {
            config.home.longitude = parse_longitude("home", v)?;
        }
    }

    // [fallback] section
    if let Some(section) = ini.section(Some("fallback")) {
        if let Some(v) = section.get("latitude") {
            config.fallback.latitude = parse_latitude("fallback", v)?;
        }
        if let Some(v) = section.get("longitude") {
            config.fallback.longitude = parse_longitude("fallback", v)?;
        }
        if let Some(v) = non_empty(section, "status") {
            config.fallback.status = v.to_string();
        }
    }

    // [providers] section
    if let Some(section) = ini.section(Some("providers")) {
        if let Some(v) = section.get("order") {
            config.providers.order = parse_order(v)?;
        }
        if let Some(v) = section.get("timeout") {
            config.providers.timeout =
                parse_positive("providers", "timeout", v, "must be a positive integer (seconds)")?;
        }
        if let Some(v) = non_empty(section, "user_agent") {
            config.providers.user_agent = v.to_string();
        }
    }

    // [history] section
    if let Some(section) = ini.section(Some("history")) {
        if let Some(v) = non_empty(section, "directory") {
            config.history.directory = expand_tilde(v);
        }
        if let Some(v) = non_empty(section, "key") {
            if v.contains(['/', '\\']) {
                return Err(invalid("history", "key", v, "must not contain path separators"));
            }
            config.history.key = v.to_string();
        }
        if let Some(v) = section.get("max_entries") {
            config.history.max_entries =
                parse_positive("history", "max_entries", v, "must be a positive integer")?;
        }
    }

    // [travel] section
    if let Some(section) = ini.section(Some("travel")) {
        if let Some(v) = non_empty(section, "origin") {
            config.travel.origin = v.to_ascii_uppercase();
        }
        if let Some(v) = non_empty(section, "origin_city") {
            config.travel.origin_city = v.to_string();
        }
        if let Some(v) = section.get("transfer_minutes") {
            config.travel.transfer_minutes = v.trim().parse().map_err(|_| {
                invalid("travel", "transfer_minutes", v, "must be a non-negative integer (minutes)")
            })?;
        }
        if let Some(v) = section.get("ground_speed_mph") {
            let speed: f64 = v.trim().parse().unwrap_or(f64::NAN);
            if !(speed.is_finite() && speed > 0.0) {
                return Err(invalid("travel", "ground_speed_mph", v, "must be a positive number"));
            }
            config.travel.ground_speed_mph = speed;
        }
    }

    // [facilities] section
    if let Some(section) = ini.section(Some("facilities")) {
        config.facilities.file = non_empty(section, "file").map(expand_tilde);
    }

    // [watch] section
    if let Some(section) = ini.section(Some("watch")) {
        if let Some(v) = section.get("interval") {
            config.watch.interval =
                parse_positive("watch", "interval", v, "must be a positive integer (seconds)")?;
        }
        if let Some(v) = section.get("retry") {
            config.watch.retry =
                parse_positive("watch", "retry", v, "must be a positive integer (seconds)")?;
        }
    }

    // [server] section
    if let Some(section) = ini.section(Some("server")) {
        if let Some(v) = section.get("bind") {
            config.server.bind = SocketAddr::from_str(v.trim()).map_err(|_| {
                invalid("server", "bind", v, "expected an address like 127.0.0.1:8787")
            })?;
        }
        if let Some(v) = section.get("serve_fallback") {
            config.server.serve_fallback = parse_bool(v)
                .ok_or_else(|| invalid("server", "serve_fallback", v, "must be true or false"))?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "file") {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn parse_latitude(section: &str, value: &str) -> Result<f64, ConfigFileError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| is_valid_latitude(*v))
        .ok_or_else(|| invalid(section, "latitude", value, "must be a number between -90 and 90"))
}

fn parse_longitude(section: &str, value: &str) -> Result<f64, ConfigFileError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| is_valid_longitude(*v))
        .ok_or_else(|| {
            invalid(section, "longitude", value, "must be a number between -180 and 180")
        })
}

fn parse_positive<T>(section: &str, key: &str, value: &str, reason: &str) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialOrd + Default,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|v| *v > T::default())
        .ok_or_else(|| invalid(section, key, value, reason))
}

fn parse_order(value: &str) -> Result<Vec<ProviderKind>, ConfigFileError> {
    let mut order = Vec::new();
    for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let kind: ProviderKind = name
            .parse()
            .map_err(|e: crate::provider::ProviderError| invalid("providers", "order", value, &e.to_string()))?;
        if !order.contains(&kind) {
            order.push(kind);
        }
    }
    if order.is_empty() {
        return Err(invalid("providers", "order", value, "must name at least one provider"));
    }
    Ok(order)
}

/// Parse a boolean value from config string.
pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
