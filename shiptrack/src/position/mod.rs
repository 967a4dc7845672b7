//! Canonical position record produced by adapters and fallbacks.
//!
//! - [`PositionRecord`] - normalized output of every resolution
//! - [`PositionQuality`] - live fix, last-known fix, or static estimate
//! - [`timestamp`] - lenient parsing of provider-reported timestamps

pub mod timestamp;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::Coordinate;

/// How trustworthy a record is.
///
/// Consumers must branch on this before presenting a position as current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionQuality {
    /// Freshly resolved from a provider.
    Live,
    /// Reused from the position history.
    LastKnown,
    /// Static configured position with no live or historical basis.
    Estimated,
}

impl fmt::Display for PositionQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "Live"),
            Self::LastKnown => write!(f, "Last known"),
            Self::Estimated => write!(f, "Estimated"),
        }
    }
}

/// Normalized vessel position.
///
/// A record only counts as resolved when both coordinates are finite and in
/// range; see [`PositionRecord::is_resolved`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    /// Target identifier (the vessel MMSI).
    pub mmsi: String,

    /// Display name of the vessel.
    pub name: String,

    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,

    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,

    /// Speed over ground in knots.
    pub speed: f64,

    /// Course over ground in degrees [0, 360).
    pub course: f64,

    /// Free-text navigational status.
    pub status: String,

    /// Source-reported time, or capture time when the source gave none.
    pub timestamp: DateTime<Utc>,

    /// Adapter or fallback that produced this record.
    pub source: String,

    /// Reused from history rather than freshly resolved.
    #[serde(default)]
    pub is_last_known: bool,

    /// Static estimate with no live or historical basis.
    #[serde(default)]
    pub is_estimated: bool,
}

impl PositionRecord {
    /// Create a live record captured now, with zero speed/course and an
    /// "Unknown" status.
    pub fn new(
        mmsi: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            mmsi: mmsi.into(),
            name: name.into(),
            latitude,
            longitude,
            speed: 0.0,
            course: 0.0,
            status: "Unknown".to_string(),
            timestamp: Utc::now(),
            source: source.into(),
            is_last_known: false,
            is_estimated: false,
        }
    }

    /// Set speed in knots. Negative or non-finite values become 0.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = sanitize_speed(speed);
        self
    }

    /// Set course in degrees, normalized to [0, 360). Non-finite becomes 0.
    pub fn with_course(mut self, course: f64) -> Self {
        self.course = normalize_course(course);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Mark this record as reused from history.
    pub fn last_known(mut self) -> Self {
        self.is_last_known = true;
        self.is_estimated = false;
        self
    }

    /// Mark this record as a static estimate.
    pub fn estimated(mut self) -> Self {
        self.is_estimated = true;
        self.is_last_known = false;
        self
    }

    /// Both coordinates present, finite and in range.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.coordinate().is_valid()
    }

    /// Freshly resolved from a provider (neither last-known nor estimated).
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.is_last_known && !self.is_estimated
    }

    pub fn quality(&self) -> PositionQuality {
        if self.is_estimated {
            PositionQuality::Estimated
        } else if self.is_last_known {
            PositionQuality::LastKnown
        } else {
            PositionQuality::Live
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

fn sanitize_speed(speed: f64) -> f64 {
    if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        0.0
    }
}

fn normalize_course(course: f64) -> f64 {
    if !course.is_finite() {
        return 0.0;
    }
    let normalized = course.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lat: f64, lon: f64) -> PositionRecord {
        PositionRecord::new("235109357", "RFA TIDESPRING", lat, lon, "Test")
    }

    #[test]
    fn test_new_record_defaults() {
        let r = record(35.0, 129.0);
        assert_eq!(r.speed, 0.0);
        assert_eq!(r.course, 0.0);
        assert_eq!(r.status, "Unknown");
        assert!(r.is_live());
        assert_eq!(r.quality(), PositionQuality::Live);
    }

    #[test]
    fn test_resolved_invariant() {
        assert!(record(35.0, 129.0).is_resolved());
        assert!(!record(f64::NAN, 129.0).is_resolved());
        assert!(!record(35.0, f64::NAN).is_resolved());
        assert!(!record(91.0, 0.0).is_resolved());
        assert!(!record(0.0, 181.0).is_resolved());
    }

    #[test]
    fn test_speed_is_sanitized() {
        assert_eq!(record(1.0, 1.0).with_speed(12.5).speed, 12.5);
        assert_eq!(record(1.0, 1.0).with_speed(-3.0).speed, 0.0);
        assert_eq!(record(1.0, 1.0).with_speed(f64::NAN).speed, 0.0);
    }

    #[test]
    fn test_course_is_normalized() {
        assert_eq!(record(1.0, 1.0).with_course(348.0).course, 348.0);
        assert_eq!(record(1.0, 1.0).with_course(360.0).course, 0.0);
        assert_eq!(record(1.0, 1.0).with_course(-90.0).course, 270.0);
        assert_eq!(record(1.0, 1.0).with_course(725.0).course, 5.0);
        assert_eq!(record(1.0, 1.0).with_course(f64::INFINITY).course, 0.0);
    }

    #[test]
    fn test_quality_flags_are_exclusive() {
        let r = record(1.0, 1.0).last_known();
        assert_eq!(r.quality(), PositionQuality::LastKnown);
        assert!(!r.is_live());

        let r = r.estimated();
        assert!(r.is_estimated);
        assert!(!r.is_last_known);
        assert_eq!(r.quality(), PositionQuality::Estimated);
    }

    #[test]
    fn test_json_field_names() {
        let r = record(35.08466, 129.10211).last_known();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["mmsi"], "235109357");
        assert_eq!(json["isLastKnown"], true);
        assert_eq!(json["isEstimated"], false);
        assert!(json["timestamp"].is_string());
    }
}
