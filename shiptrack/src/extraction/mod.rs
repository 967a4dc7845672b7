//! Pattern-based value extraction for providers that serve HTML or text.
//!
//! Scraped page markup is unstable: the same value can show up as
//! `"lat": 12.3`, `Latitude: 12.3°` or inside a combined `12.3° / 45.6°`
//! token. Each provider therefore declares an ordered list of
//! (field → pattern) rules, and one shared routine evaluates them:
//!
//! - rules for a field are tried in declaration order
//! - the first rule whose capture group 1 matches (and parses, for numeric
//!   fields) wins for that field
//! - fields without a matching rule stay `None`
//!
//! ```
//! use shiptrack::extraction::{extract, ExtractionRules, Field};
//!
//! let rules = ExtractionRules::builder()
//!     .rule(Field::Latitude, r#""lat":\s*([+-]?\d+\.\d+)"#)
//!     .rule(Field::Longitude, r#""lng":\s*([+-]?\d+\.\d+)"#)
//!     .build()
//!     .unwrap();
//!
//! let partial = extract(r#"{"lat": 35.08, "lng": 129.10}"#, &rules);
//! assert_eq!(partial.fix().map(|c| c.latitude), Some(35.08));
//! ```
//!
//! # Zero coordinates
//!
//! A latitude or longitude of exactly 0 is treated as a failed extraction,
//! not as an equatorial or prime-meridian fix. Pages routinely carry
//! placeholder zeros that loose patterns pick up. The cost is that a genuine
//! fix on the equator or the prime meridian is rejected; this limitation is
//! accepted and covered by tests.

mod rules;

pub use rules::{ExtractionError, ExtractionRule, ExtractionRules, ExtractionRulesBuilder, Field};

use crate::geo::Coordinate;

/// Values extracted from one response payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialPosition {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub course: Option<f64>,
    pub status: Option<String>,
}

impl PartialPosition {
    /// The coordinate pair, if this payload yielded a usable fix.
    ///
    /// Requires both coordinates from the same payload, both non-zero and in
    /// range. A half-resolved position is never a valid fix.
    pub fn fix(&self) -> Option<Coordinate> {
        let (latitude, longitude) = (self.latitude?, self.longitude?);
        if latitude == 0.0 || longitude == 0.0 {
            return None;
        }
        let coordinate = Coordinate::new(latitude, longitude);
        coordinate.is_valid().then_some(coordinate)
    }
}

/// Run every rule set against `text`, first match per field wins.
pub fn extract(text: &str, rules: &ExtractionRules) -> PartialPosition {
    let number = |field| {
        rules
            .for_field(field)
            .find_map(|rule| rule.capture_number(text))
    };

    let partial = PartialPosition {
        latitude: number(Field::Latitude),
        longitude: number(Field::Longitude),
        speed: number(Field::Speed),
        course: number(Field::Course),
        status: rules
            .for_field(Field::Status)
            .find_map(|rule| rule.capture_text(text)),
    };

    tracing::trace!(
        latitude = ?partial.latitude,
        longitude = ?partial.longitude,
        speed = ?partial.speed,
        course = ?partial.course,
        "Extraction finished"
    );

    partial
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate_rules() -> ExtractionRules {
        ExtractionRules::builder()
            .rule(
                Field::Latitude,
                r"([+-]?\d+\.\d+)°\s*/\s*[+-]?\d+\.\d+°",
            )
            .rule(Field::Latitude, r"(?i)latitude[:\s]+([+-]?\d+\.\d+)")
            .rule(
                Field::Longitude,
                r"[+-]?\d+\.\d+°\s*/\s*([+-]?\d+\.\d+)°",
            )
            .rule(Field::Longitude, r"(?i)longitude[:\s]+([+-]?\d+\.\d+)")
            .rule(Field::Speed, r"(?i)speed[:\s]+(\d+\.?\d*)")
            .rule(Field::Speed, r"(?i)(\d+\.\d+)\s*knots")
            .rule(Field::Course, r"(?i)course[:\s]+(\d+)")
            .rule(Field::Status, r"(?i)status[:\s]+([A-Za-z][A-Za-z ]+)")
            .build()
            .unwrap()
    }

    #[test]
    fn test_combined_token() {
        let html = r#"<div class="pos">35.08466° / 129.10211°</div>"#;
        let partial = extract(html, &coordinate_rules());
        let fix = partial.fix().unwrap();
        assert_eq!(fix.latitude, 35.08466);
        assert_eq!(fix.longitude, 129.10211);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Both the combined token and the labelled form are present; the
        // combined token is declared first.
        let html = "Latitude: 10.5 Longitude: 20.5 <b>35.1° / 129.1°</b>";
        let fix = extract(html, &coordinate_rules()).fix().unwrap();
        assert_eq!(fix.latitude, 35.1);
        assert_eq!(fix.longitude, 129.1);
    }

    #[test]
    fn test_falls_through_to_later_rule() {
        let html = "Latitude: -33.8500 Longitude: 151.2100";
        let fix = extract(html, &coordinate_rules()).fix().unwrap();
        assert_eq!(fix.latitude, -33.85);
        assert_eq!(fix.longitude, 151.21);
    }

    #[test]
    fn test_optional_fields() {
        let html = "35.1° / 129.1° Speed: 3.9 Course: 348 Status: Under way";
        let partial = extract(html, &coordinate_rules());
        assert_eq!(partial.speed, Some(3.9));
        assert_eq!(partial.course, Some(348.0));
        assert_eq!(partial.status.as_deref(), Some("Under way"));
    }

    #[test]
    fn test_speed_second_pattern() {
        let partial = extract("moving at 12.5 Knots", &coordinate_rules());
        assert_eq!(partial.speed, Some(12.5));
    }

    #[test]
    fn test_half_fix_is_rejected() {
        let partial = extract("Latitude: 35.1", &coordinate_rules());
        assert_eq!(partial.latitude, Some(35.1));
        assert!(partial.longitude.is_none());
        assert!(partial.fix().is_none());
    }

    #[test]
    fn test_zero_latitude_is_rejected() {
        let partial = extract("Latitude: 0.0 Longitude: 129.1", &coordinate_rules());
        assert_eq!(partial.latitude, Some(0.0));
        assert!(partial.fix().is_none());
    }

    #[test]
    fn test_zero_longitude_is_rejected() {
        let partial = extract("0.0° / 0.0°", &coordinate_rules());
        assert!(partial.fix().is_none());
    }

    #[test]
    fn test_genuine_equatorial_fix_is_rejected() {
        // Known limitation of the zero-coordinate guard.
        let partial = PartialPosition {
            latitude: Some(0.0),
            longitude: Some(32.5),
            ..Default::default()
        };
        assert!(partial.fix().is_none());
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let partial = extract("Latitude: 95.0 Longitude: 10.0", &coordinate_rules());
        assert!(partial.fix().is_none());
    }

    #[test]
    fn test_no_match_is_empty() {
        let partial = extract("<html>Vessel not found</html>", &coordinate_rules());
        assert_eq!(partial, PartialPosition::default());
    }
}
