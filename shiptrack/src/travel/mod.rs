//! Travel time estimates and flight booking links.
//!
//! A trip to the vessel is modelled as three legs added together: a fixed
//! transfer from home to the origin airport, a flight looked up in a
//! [`FlightTable`], and a ground/sea leg from the destination airport to the
//! vessel at a constant average speed.

mod flights;
mod links;

pub use flights::{
    FlightTable, DEFAULT_ROUTE_DURATION, DEFAULT_ROUTE_PRICE, UNPARSEABLE_DURATION_MINUTES,
};
pub use links::{BookingLinks, FlightLinks};

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::airport::NearestAirport;

/// Default origin airport code.
pub const DEFAULT_ORIGIN: &str = "LHR";

/// Default origin city used in flight searches.
pub const DEFAULT_ORIGIN_CITY: &str = "London";

/// Default minutes from home to the origin airport.
pub const DEFAULT_TRANSFER_MINUTES: u32 = 45;

/// Default average speed from the destination airport to the vessel.
pub const DEFAULT_GROUND_SPEED_MPH: f64 = 50.0;

/// Trip parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelSettings {
    pub origin: String,
    pub origin_city: String,
    pub transfer_minutes: u32,
    /// Must be positive.
    pub ground_speed_mph: f64,
}

impl Default for TravelSettings {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            origin_city: DEFAULT_ORIGIN_CITY.to_string(),
            transfer_minutes: DEFAULT_TRANSFER_MINUTES,
            ground_speed_mph: DEFAULT_GROUND_SPEED_MPH,
        }
    }
}

/// Estimated door-to-vessel travel time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelEstimate {
    pub destination: String,
    pub total_minutes: u32,
    /// `"Xh Ym"`.
    pub formatted: String,
    pub transfer_minutes: u32,
    pub flight_minutes: u32,
    pub final_leg_minutes: u32,
}

/// Sum the three legs of a trip to the vessel via `nearest`.
///
/// The total saturates at `u32::MAX` minutes.
pub fn estimate_travel(
    nearest: &NearestAirport,
    flights: &FlightTable,
    settings: &TravelSettings,
) -> TravelEstimate {
    let flight_minutes = flights.duration_minutes(&settings.origin, &nearest.airport.code);
    let final_leg_minutes = leg_minutes(nearest.distance, settings.ground_speed_mph);
    let total_minutes = settings
        .transfer_minutes
        .saturating_add(flight_minutes)
        .saturating_add(final_leg_minutes);

    TravelEstimate {
        destination: nearest.airport.code.clone(),
        total_minutes,
        formatted: format_minutes(total_minutes),
        transfer_minutes: settings.transfer_minutes,
        flight_minutes,
        final_leg_minutes,
    }
}

fn leg_minutes(distance_miles: f64, speed_mph: f64) -> u32 {
    let minutes = (distance_miles * 60.0 / speed_mph).round();
    if minutes.is_finite() && minutes > 0.0 {
        minutes as u32
    } else {
        0
    }
}

/// Parse `"11h 30m"` style durations into minutes.
pub fn parse_duration_minutes(text: &str) -> Option<u32> {
    let caps = duration_pattern().captures(text)?;
    let hours: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: u32 = caps.get(2)?.as_str().parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)h\s*(\d+)m").unwrap())
}

/// Format minutes as `"Xh Ym"`.
pub fn format_minutes(total: u32) -> String {
    format!("{}h {}m", total / 60, total % 60)
}
