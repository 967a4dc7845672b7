//! Airport table and nearest-airport lookup.
//!
//! The table defaults to a built-in list of airports around the
//! Mediterranean and East Asia. A list file can replace it; see
//! [`AirportFileParser`] for the format.
//!
//! # Example
//!
//! ```
//! use shiptrack::airport::AirportTable;
//! use shiptrack::geo::Coordinate;
//!
//! let table = AirportTable::builtin();
//! let nearest = table.nearest(Coordinate::new(35.08, 129.10)).unwrap();
//! assert_eq!(nearest.airport.code, "PUS");
//! ```

mod builtin;
mod parser;

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::geo::{haversine_miles, Coordinate};

pub use parser::{AirportFileParser, ParseError};

/// Error loading an airport list file.
#[derive(Debug, thiserror::Error)]
pub enum AirportFileError {
    #[error("Airport file not found at: {0}")]
    NotFound(PathBuf),
    #[error("Failed to parse airport file: {0}")]
    Parse(#[from] ParseError),
    #[error("Airport file {0} contains no airports")]
    Empty(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An airport that can serve as the destination of a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    /// IATA code, upper case.
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// City used in booking searches.
    pub city: String,
}

impl Airport {
    pub fn new(code: &str, name: &str, latitude: f64, longitude: f64, city: &str) -> Self {
        Self {
            code: code.to_uppercase(),
            name: name.to_string(),
            latitude,
            longitude,
            city: city.to_string(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Result of a nearest-airport lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestAirport {
    pub airport: Airport,
    /// Great-circle distance in miles.
    pub distance: f64,
}

/// Ordered airport table.
///
/// Order matters: lookups break distance ties in favour of the earlier entry.
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    airports: Vec<Airport>,
}

impl AirportTable {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self { airports }
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        Self::new(builtin::builtin_airports())
    }

    /// Load a table from a list file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AirportFileError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AirportFileError::NotFound(path.to_path_buf()));
        }

        let table = Self::from_reader(File::open(path)?)?;
        if table.is_empty() {
            return Err(AirportFileError::Empty(path.to_path_buf()));
        }

        tracing::info!(path = %path.display(), count = table.len(), "Loaded airport table");
        Ok(table)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, AirportFileError> {
        Ok(Self::new(AirportFileParser::parse_all(reader)?))
    }

    /// Airport closest to `position`, or `None` for an empty table.
    ///
    /// Linear scan; the first of several equally distant airports wins.
    pub fn nearest(&self, position: Coordinate) -> Option<NearestAirport> {
        let mut best: Option<(&Airport, f64)> = None;

        for airport in &self.airports {
            let distance = haversine_miles(position, airport.coordinate());
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((airport, distance)),
            }
        }

        best.map(|(airport, distance)| NearestAirport {
            airport: airport.clone(),
            distance,
        })
    }

    /// Look up an airport by code, case-insensitively.
    pub fn get(&self, code: &str) -> Option<&Airport> {
        self.airports
            .iter()
            .find(|a| a.code.eq_ignore_ascii_case(code))
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter()
    }
}
