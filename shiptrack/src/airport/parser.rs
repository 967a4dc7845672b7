//! Parser for airport list files.
//!
//! One airport per line as `code,name,latitude,longitude,city`. Blank lines
//! and lines starting with `#` are ignored. The city column is optional and
//! defaults to the name.

use std::io::{BufRead, BufReader, Read};

use super::Airport;
use crate::geo::{is_valid_latitude, is_valid_longitude};

/// Error type for airport file parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid airport line {line}: {message}")]
    InvalidFormat { line: usize, message: String },
}

/// Parser for the airport list format.
pub struct AirportFileParser;

impl AirportFileParser {
    /// Parse airports line by line.
    pub fn parse<R: Read>(reader: R) -> impl Iterator<Item = Result<Airport, ParseError>> {
        BufReader::new(reader)
            .lines()
            .enumerate()
            .filter_map(|(index, line)| match line {
                Ok(line) => parse_line(index + 1, &line),
                Err(e) => Some(Err(ParseError::Io(e))),
            })
    }

    /// Parse all airports, skipping malformed lines with a warning.
    ///
    /// I/O errors abort the parse.
    pub fn parse_all<R: Read>(reader: R) -> Result<Vec<Airport>, ParseError> {
        let mut airports = Vec::new();
        for result in Self::parse(reader) {
            match result {
                Ok(airport) => airports.push(airport),
                Err(ParseError::Io(e)) => return Err(ParseError::Io(e)),
                Err(e) => tracing::warn!("Skipping airport: {}", e),
            }
        }
        Ok(airports)
    }
}

fn parse_line(line_number: usize, line: &str) -> Option<Result<Airport, ParseError>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(parse_fields(line_number, line))
}

fn parse_fields(line: usize, text: &str) -> Result<Airport, ParseError> {
    let invalid = |message: String| ParseError::InvalidFormat { line, message };

    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() < 4 || parts.len() > 5 {
        return Err(invalid(format!("expected 4 or 5 fields, found {}", parts.len())));
    }

    let code = parts[0];
    if code.is_empty() {
        return Err(invalid("empty airport code".to_string()));
    }
    let name = parts[1];

    let latitude: f64 = parts[2]
        .parse()
        .map_err(|_| invalid(format!("bad latitude '{}'", parts[2])))?;
    let longitude: f64 = parts[3]
        .parse()
        .map_err(|_| invalid(format!("bad longitude '{}'", parts[3])))?;
    if !is_valid_latitude(latitude) || !is_valid_longitude(longitude) {
        return Err(invalid(format!(
            "coordinates out of range ({}, {})",
            latitude, longitude
        )));
    }

    let city = parts.get(4).copied().filter(|c| !c.is_empty()).unwrap_or(name);

    Ok(Airport::new(code, name, latitude, longitude, city))
}
