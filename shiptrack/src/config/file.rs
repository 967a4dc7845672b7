//! Configuration file handling for ~/.shiptrack/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::settings::ConfigFile;
use crate::airport::{AirportFileError, AirportTable};
use crate::geo::{Coordinate, ReferencePoint};
use crate::history::JsonFileBlob;
use crate::provider::AdapterSettings;
use crate::resolver::EstimatedPosition;
use crate::travel::TravelSettings;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.shiptrack/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Render as the commented INI text [`save_to`](Self::save_to) writes.
    pub fn to_ini_string(&self) -> String {
        super::writer::to_config_string(self)
    }

    /// Settings for the provider adapters.
    pub fn adapter_settings(&self) -> AdapterSettings {
        AdapterSettings {
            order: self.providers.order.clone(),
            timeout: Duration::from_secs(self.providers.timeout),
            user_agent: self.providers.user_agent.clone(),
            vessel_name: self.vessel.name.clone(),
        }
    }

    pub fn reference_point(&self) -> ReferencePoint {
        ReferencePoint::new(self.home.label.as_str(), self.home.latitude, self.home.longitude)
    }

    /// The configured estimate.
    ///
    /// Coordinates are range-checked when the file is parsed, so this only
    /// fails for values set programmatically.
    pub fn estimated_position(&self) -> Result<EstimatedPosition, ConfigFileError> {
        let coordinate = Coordinate::new(self.fallback.latitude, self.fallback.longitude);
        EstimatedPosition::new(coordinate, self.fallback.status.as_str()).map_err(|e| {
            ConfigFileError::InvalidValue {
                section: "fallback".to_string(),
                key: "latitude/longitude".to_string(),
                value: format!("{}, {}", self.fallback.latitude, self.fallback.longitude),
                reason: e.to_string(),
            }
        })
    }

    pub fn travel_settings(&self) -> TravelSettings {
        TravelSettings {
            origin: self.travel.origin.clone(),
            origin_city: self.travel.origin_city.clone(),
            transfer_minutes: self.travel.transfer_minutes,
            ground_speed_mph: self.travel.ground_speed_mph,
        }
    }

    /// The airport list file if one is configured, else the built-in table.
    pub fn airport_table(&self) -> Result<AirportTable, AirportFileError> {
        match &self.facilities.file {
            Some(path) => AirportTable::from_file(path),
            None => Ok(AirportTable::builtin()),
        }
    }

    pub fn history_blob(&self) -> JsonFileBlob {
        JsonFileBlob::new(&self.history.directory, &self.history.key)
    }
}

/// Get the path to the config directory (~/.shiptrack).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".shiptrack")
}

/// Get the path to the config file (~/.shiptrack/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use crate::provider::ProviderKind;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.vessel.id, DEFAULT_VESSEL_ID);
        assert_eq!(config.providers.order, ProviderKind::default_order());
        assert_eq!(config.providers.timeout, 8);
        assert_eq!(config.history.max_entries, 100);
        assert_eq!(config.history.key, "shiptrack_history");
        assert_eq!(config.watch.interval, DEFAULT_WATCH_INTERVAL_SECS);
        assert_eq!(config.server.bind.to_string(), crate::server::DEFAULT_BIND);
        assert!(config.facilities.file.is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_runtime_conversions() {
        let config = ConfigFile::default();

        let adapters = config.adapter_settings();
        assert_eq!(adapters.timeout, Duration::from_secs(8));
        assert_eq!(adapters.vessel_name, DEFAULT_VESSEL_NAME);

        let home = config.reference_point();
        assert_eq!(home.coordinate, Coordinate::new(51.4816, -0.1297));

        let estimate = config.estimated_position().unwrap();
        assert_eq!(estimate.coordinate(), Coordinate::new(36.1, -5.3));

        assert_eq!(config.airport_table().unwrap().len(), 15);
        assert!(config.history_blob().path().ends_with("shiptrack_history.json"));
    }

    #[test]
    fn test_programmatic_invalid_estimate() {
        let mut config = ConfigFile::default();
        config.fallback.latitude = 200.0;
        assert!(matches!(
            config.estimated_position(),
            Err(ConfigFileError::InvalidValue { .. })
        ));
    }
}
