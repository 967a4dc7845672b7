//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and tracker
//! construction so each command handler starts from the same state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use shiptrack::config::{config_file_path, ConfigFile};
use shiptrack::history::{HistoryBlob, MemoryBlob, PositionHistory};
use shiptrack::logging::{init_logging, LoggingGuard};
use shiptrack::provider::build_adapters;
use shiptrack::resolver::Resolver;
use shiptrack::tracker::ShipTracker;
use shiptrack::travel::FlightTable;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
    config_path: PathBuf,
    persist: bool,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file to read; `~/.shiptrack/config.ini` when `None`
    /// * `stdout_logs` - Mirror log output to stdout (long-running commands)
    /// * `debug_mode` - Enable debug-level logging for the library
    pub fn new(
        config_path: Option<&Path>,
        stdout_logs: bool,
        debug_mode: bool,
    ) -> Result<Self, CliError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let logging_guard = init_logging(&config.logging.file, stdout_logs, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            config_path,
            persist: true,
        })
    }

    /// Keep position history in memory only.
    pub fn without_persistence(mut self) -> Self {
        self.persist = false;
        self
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Path the configuration was read from.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("shiptrack v{}", shiptrack::VERSION);
        info!(
            command,
            config = %self.config_path.display(),
            vessel = %self.config.vessel.id,
            "shiptrack CLI starting"
        );
    }

    /// Build the tracker described by the loaded configuration.
    pub fn create_tracker(&self) -> Result<Arc<ShipTracker>, CliError> {
        let config = &self.config;

        let adapters = build_adapters(&config.adapter_settings())?;
        let blob: Box<dyn HistoryBlob> = if self.persist {
            Box::new(config.history_blob())
        } else {
            info!("History persistence disabled");
            Box::new(MemoryBlob::new())
        };
        let history = PositionHistory::load(blob, config.history.max_entries);
        let resolver = Resolver::new(
            adapters,
            history,
            config.reference_point(),
            config.estimated_position()?,
            config.vessel.name.as_str(),
        );

        info!(
            providers = ?resolver.adapter_names(),
            "Provider chain ready"
        );

        Ok(Arc::new(ShipTracker::new(
            resolver,
            config.vessel.id.as_str(),
            config.airport_table()?,
            FlightTable::builtin(),
            config.travel_settings(),
        )))
    }
}
