//! First-success fallback resolution.
//!
//! [`Resolver::resolve`] tries each adapter in priority order and returns the
//! first resolved record. Later adapters are never called once one succeeds.
//! When every adapter fails, the most recent history entry is returned as a
//! last-known record, and with no history a configured estimate is returned.
//! The result is therefore always a resolved record, and its flags say which
//! of the three paths produced it.
//!
//! Live results are appended to the [`PositionHistory`] with their distance to
//! the reference point at that moment.

mod single_flight;

pub use single_flight::{FlightGuard, SingleFlight};

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::geo::{Coordinate, ReferencePoint};
use crate::history::{HistoryEntry, HistoryError, PositionHistory};
use crate::position::PositionRecord;
use crate::provider::PositionAdapter;

/// Source label of records rebuilt from history.
pub const HISTORICAL_SOURCE: &str = "Historical";

/// Source label of the configured estimate.
pub const ESTIMATED_SOURCE: &str = "Estimated";

/// Status of records rebuilt from history.
pub const LAST_KNOWN_STATUS: &str = "Last known position";

/// Default status of the configured estimate.
pub const DEFAULT_ESTIMATE_STATUS: &str = "Real data unavailable - showing estimated position";

/// Default estimated coordinate (Strait of Gibraltar).
pub const DEFAULT_ESTIMATE: Coordinate = Coordinate::new(36.1, -5.3);

/// Errors building a resolver.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("Estimated position ({latitude}, {longitude}) is out of range")]
    InvalidEstimate { latitude: f64, longitude: f64 },
}

/// Last-resort position returned when there is neither a live fix nor history.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatedPosition {
    coordinate: Coordinate,
    status: String,
}

impl EstimatedPosition {
    /// Validated estimate. The coordinate must be finite and in range.
    pub fn new(coordinate: Coordinate, status: impl Into<String>) -> Result<Self, ResolverError> {
        if !coordinate.is_valid() {
            return Err(ResolverError::InvalidEstimate {
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            });
        }
        Ok(Self {
            coordinate,
            status: status.into(),
        })
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl Default for EstimatedPosition {
    fn default() -> Self {
        Self {
            coordinate: DEFAULT_ESTIMATE,
            status: DEFAULT_ESTIMATE_STATUS.to_string(),
        }
    }
}

/// Ordered adapters plus the fallback chain.
pub struct Resolver {
    adapters: Vec<Box<dyn PositionAdapter>>,
    history: Mutex<PositionHistory>,
    reference: ReferencePoint,
    estimate: EstimatedPosition,
    vessel_name: String,
}

impl Resolver {
    pub fn new(
        adapters: Vec<Box<dyn PositionAdapter>>,
        history: PositionHistory,
        reference: ReferencePoint,
        estimate: EstimatedPosition,
        vessel_name: impl Into<String>,
    ) -> Self {
        Self {
            adapters,
            history: Mutex::new(history),
            reference,
            estimate,
            vessel_name: vessel_name.into(),
        }
    }

    /// Resolve the current position of `target_id`. Never fails.
    pub async fn resolve(&self, target_id: &str) -> PositionRecord {
        for adapter in &self.adapters {
            debug!(provider = adapter.name(), target_id, "Trying provider");

            match adapter.fetch(target_id).await {
                Some(record) if record.is_resolved() => {
                    info!(
                        provider = adapter.name(),
                        latitude = record.latitude,
                        longitude = record.longitude,
                        "Position resolved"
                    );
                    self.remember(&record);
                    return record;
                }
                Some(_) => {
                    warn!(provider = adapter.name(), "Provider returned an unresolved record");
                }
                None => {
                    debug!(provider = adapter.name(), "Provider had no position");
                }
            }
        }

        self.fallback(target_id)
    }

    fn remember(&self, record: &PositionRecord) {
        let distance = self.reference.distance_to(record.coordinate());
        self.history
            .lock()
            .append(HistoryEntry::from_record(record, distance));
    }

    fn fallback(&self, target_id: &str) -> PositionRecord {
        let latest = self
            .history
            .lock()
            .latest()
            .filter(|e| e.coordinate().is_valid())
            .cloned();
        if let Some(entry) = latest {
            warn!(
                latitude = entry.latitude,
                longitude = entry.longitude,
                captured = %entry.timestamp,
                "All providers failed, using last known position"
            );
            return PositionRecord::new(
                target_id,
                self.vessel_name.as_str(),
                entry.latitude,
                entry.longitude,
                HISTORICAL_SOURCE,
            )
            .with_speed(entry.speed)
            .with_status(LAST_KNOWN_STATUS)
            .with_timestamp(entry.timestamp)
            .last_known();
        }

        warn!("All providers failed and no history, using estimated position");
        let coordinate = self.estimate.coordinate();
        PositionRecord::new(
            target_id,
            self.vessel_name.as_str(),
            coordinate.latitude,
            coordinate.longitude,
            ESTIMATED_SOURCE,
        )
        .with_status(self.estimate.status())
        .with_timestamp(Utc::now())
        .estimated()
    }

    pub fn reference(&self) -> &ReferencePoint {
        &self.reference
    }

    pub fn vessel_name(&self) -> &str {
        &self.vessel_name
    }

    pub fn adapter_names(&self) -> Vec<String> {
        self.adapters.iter().map(|a| a.name().to_string()).collect()
    }

    /// History entries, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.lock().all()
    }

    pub fn latest_history_entry(&self) -> Option<HistoryEntry> {
        self.history.lock().latest().cloned()
    }

    /// Clear the history in memory and in its blob.
    pub fn reset_history(&self) -> Result<(), HistoryError> {
        self.history.lock().reset()
    }
}
