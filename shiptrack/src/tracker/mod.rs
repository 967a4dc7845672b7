//! Tracker facade.
//!
//! [`ShipTracker`] ties the resolver to the derived metrics. It remembers the
//! last resolved record so distance, nearest airport and travel time can be
//! read without another round of network calls, and it owns the single-flight
//! guard that keeps periodic refreshes from overlapping.

use chrono::{DateTime, Days, NaiveDate, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use crate::airport::{AirportTable, NearestAirport};
use crate::geo::sea_area_name;
use crate::history::{HistoryEntry, HistoryError};
use crate::position::{PositionQuality, PositionRecord};
use crate::resolver::{Resolver, SingleFlight};
use crate::travel::{estimate_travel, FlightLinks, FlightTable, TravelEstimate, TravelSettings};

/// The last resolution and everything derived from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSnapshot {
    pub record: PositionRecord,
    pub updated_at: DateTime<Utc>,
    /// Miles from the reference point to the vessel.
    pub distance: f64,
    pub sea_area: &'static str,
    pub nearest_airport: Option<NearestAirport>,
    pub travel: Option<TravelEstimate>,
}

impl TrackerSnapshot {
    pub fn quality(&self) -> PositionQuality {
        self.record.quality()
    }
}

#[derive(Debug, Clone)]
struct LastResolution {
    record: PositionRecord,
    updated_at: DateTime<Utc>,
}

/// Single-vessel tracker.
pub struct ShipTracker {
    resolver: Resolver,
    target_id: String,
    airports: AirportTable,
    flights: FlightTable,
    travel: TravelSettings,
    last: RwLock<Option<LastResolution>>,
    flight: SingleFlight,
}

impl ShipTracker {
    pub fn new(
        resolver: Resolver,
        target_id: impl Into<String>,
        airports: AirportTable,
        flights: FlightTable,
        travel: TravelSettings,
    ) -> Self {
        Self {
            resolver,
            target_id: target_id.into(),
            airports,
            flights,
            travel,
            last: RwLock::new(None),
            flight: SingleFlight::new(),
        }
    }

    /// Resolve the vessel again.
    ///
    /// Returns `None` without doing anything when a refresh is already in
    /// progress.
    pub async fn refresh(&self) -> Option<PositionRecord> {
        let Some(_guard) = self.flight.try_begin() else {
            debug!(target_id = %self.target_id, "Refresh already in progress, skipping");
            return None;
        };

        let record = self.resolver.resolve(&self.target_id).await;
        info!(
            source = %record.source,
            quality = %record.quality(),
            latitude = record.latitude,
            longitude = record.longitude,
            "Tracker updated"
        );

        *self.last.write() = Some(LastResolution {
            record: record.clone(),
            updated_at: Utc::now(),
        });
        Some(record)
    }

    pub fn is_refreshing(&self) -> bool {
        self.flight.is_in_flight()
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Last resolved record.
    pub fn current(&self) -> Option<PositionRecord> {
        self.last.read().as_ref().map(|l| l.record.clone())
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last.read().as_ref().map(|l| l.updated_at)
    }

    /// Miles from the reference point to the last resolved position.
    pub fn distance_to_vessel(&self) -> Option<f64> {
        self.current()
            .map(|r| self.resolver.reference().distance_to(r.coordinate()))
    }

    pub fn nearest_airport(&self) -> Option<NearestAirport> {
        let record = self.current()?;
        self.airports.nearest(record.coordinate())
    }

    pub fn travel_estimate(&self) -> Option<TravelEstimate> {
        let nearest = self.nearest_airport()?;
        Some(estimate_travel(&nearest, &self.flights, &self.travel))
    }

    /// Booking links to the nearest airport for `date`, tomorrow by default.
    pub fn flight_links(&self, date: Option<NaiveDate>) -> Option<FlightLinks> {
        let nearest = self.nearest_airport()?;
        let date = date.unwrap_or_else(tomorrow);
        Some(FlightLinks::new(
            &self.travel.origin,
            &self.travel.origin_city,
            &nearest.airport,
            date,
            &self.flights,
        ))
    }

    /// Last resolution with its derived metrics.
    pub fn snapshot(&self) -> Option<TrackerSnapshot> {
        let last = self.last.read().clone()?;
        let position = last.record.coordinate();
        let nearest_airport = self.airports.nearest(position);
        let travel = nearest_airport
            .as_ref()
            .map(|n| estimate_travel(n, &self.flights, &self.travel));

        Some(TrackerSnapshot {
            distance: self.resolver.reference().distance_to(position),
            sea_area: sea_area_name(position.latitude, position.longitude),
            nearest_airport,
            travel,
            updated_at: last.updated_at,
            record: last.record,
        })
    }

    /// Position history, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.resolver.history()
    }

    pub fn clear_history(&self) -> Result<(), HistoryError> {
        self.resolver.reset_history()
    }
}

fn tomorrow() -> NaiveDate {
    let today = Utc::now().date_naive();
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}
