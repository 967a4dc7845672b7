//! Coarse naming of the sea area a position falls in.
//!
//! Boxes are checked in order and the first match wins, so the more specific
//! areas must come before the broad ones.

/// (name, min_lat, max_lat, min_lon, max_lon), all bounds exclusive.
const SEA_AREAS: &[(&str, f64, f64, f64, f64)] = &[
    // European waters
    ("Western Mediterranean", 40.0, 44.0, -6.0, 3.0),
    ("Southern Spain/Gibraltar", 35.0, 40.0, -10.0, 5.0),
    ("Central Mediterranean", 30.0, 37.0, 10.0, 20.0),
    ("Bay of Biscay/Atlantic", 40.0, 60.0, -15.0, 0.0),
    ("English Channel", 50.0, 52.0, -2.0, 2.0),
    // Asian waters
    ("Japan Sea", 33.0, 42.0, 127.0, 142.0),
    ("Korea Strait", 34.0, 38.0, 124.0, 130.0),
    ("East China Sea", 25.0, 35.0, 120.0, 130.0),
    ("Pacific Ocean (Japan)", 30.0, 40.0, 135.0, 145.0),
    // Broad regions
    ("Western Pacific", 10.0, 40.0, 100.0, 150.0),
    ("North Sea/Baltic", 50.0, 70.0, -10.0, 30.0),
];

/// Name used when no area matches.
pub const OPEN_SEA: &str = "At sea";

/// Returns a human-readable sea area name for a position.
pub fn sea_area_name(latitude: f64, longitude: f64) -> &'static str {
    SEA_AREAS
        .iter()
        .find(|(_, min_lat, max_lat, min_lon, max_lon)| {
            latitude > *min_lat && latitude < *max_lat && longitude > *min_lon && longitude < *max_lon
        })
        .map(|(name, ..)| *name)
        .unwrap_or(OPEN_SEA)
}
