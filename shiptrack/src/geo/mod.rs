//! Geographic primitives and great-circle math.
//!
//! Conventions:
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Distance: statute miles

mod area;

pub use area::sea_area_name;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Earth's mean radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Valid latitude range.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

const DEG_TO_RAD: f64 = PI / 180.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are finite and inside their ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        is_valid_latitude(self.latitude) && is_valid_longitude(self.longitude)
    }

    /// Great-circle distance to `other` in miles.
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_miles(*self, *other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// The fixed "home" location distances are measured against.
///
/// Configured once at startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePoint {
    pub label: String,
    pub coordinate: Coordinate,
}

impl ReferencePoint {
    pub fn new(label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            label: label.into(),
            coordinate: Coordinate::new(latitude, longitude),
        }
    }

    /// Distance from this reference point to `position`, in miles.
    pub fn distance_to(&self, position: Coordinate) -> f64 {
        haversine_miles(self.coordinate, position)
    }
}

#[inline]
pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (MIN_LAT..=MAX_LAT).contains(&lat)
}

#[inline]
pub fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && (MIN_LON..=MAX_LON).contains(&lon)
}

/// Great-circle distance between two positions using the haversine formula.
///
/// Inputs are not validated: a NaN component yields a NaN distance, so
/// callers must check coordinates upstream.
///
/// # Example
///
/// ```
/// use shiptrack::geo::{haversine_miles, Coordinate};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(1.0, 0.0);
/// assert!((haversine_miles(a, b) - 69.1).abs() < 0.1);
/// ```
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude * DEG_TO_RAD;
    let lat2_rad = to.latitude * DEG_TO_RAD;
    let delta_lat = (to.latitude - from.latitude) * DEG_TO_RAD;
    let delta_lon = (to.longitude - from.longitude) * DEG_TO_RAD;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair above 1 for antipodal points. A plain
    // comparison keeps NaN flowing through (f64::min would swallow it).
    let a = if a > 1.0 { 1.0 } else { a };
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_MILES * c
}
