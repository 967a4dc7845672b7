//! Built-in provider presets.

use std::fmt;
use std::str::FromStr;

use super::request::{Envelope, RequestSpec};
use super::types::ProviderError;
use crate::extraction::{ExtractionError, ExtractionRules, Field};

/// CORS proxy returning the target body unchanged.
pub const RAW_PROXY: &str = "https://api.allorigins.win/raw?url=";

/// CORS proxy returning `{"contents": "..."}`.
pub const CONTENTS_PROXY: &str = "https://api.allorigins.win/get?url=";

/// A known position source.
///
/// Adding a source means adding a variant here and teaching
/// [`ProviderKind::request`] and [`ProviderKind::rules`] about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// MyShipTracking vessel page, scraped directly.
    MyShipTracking,
    /// VesselFinder click API (JSON) through the raw proxy.
    VesselFinder,
    /// MarineTraffic details page through the contents proxy.
    MarineTraffic,
    /// VesselFinder name search page through the contents proxy.
    VesselFinderSearch,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        Self::MyShipTracking,
        Self::VesselFinder,
        Self::MarineTraffic,
        Self::VesselFinderSearch,
    ];

    /// Default priority order.
    pub fn default_order() -> Vec<ProviderKind> {
        Self::ALL.to_vec()
    }

    /// Config-file identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MyShipTracking => "myshiptracking",
            Self::VesselFinder => "vesselfinder",
            Self::MarineTraffic => "marinetraffic",
            Self::VesselFinderSearch => "vesselfinder_search",
        }
    }

    /// Source label written into records.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MyShipTracking => "MyShipTracking",
            Self::VesselFinder => "VesselFinder",
            Self::MarineTraffic => "MarineTraffic",
            Self::VesselFinderSearch => "VesselFinderSearch",
        }
    }

    /// Whether the source answers with JSON rather than a page.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::VesselFinder)
    }

    pub fn request(&self) -> RequestSpec {
        match self {
            Self::MyShipTracking => {
                RequestSpec::direct("https://www.myshiptracking.com/vessels/mmsi-{id}")
                    .with_header("Accept", "text/html,application/xhtml+xml")
            }
            Self::VesselFinder => RequestSpec::proxied(
                "https://www.vesselfinder.com/api/pub/click/{id}",
                RAW_PROXY,
                Envelope::Raw,
            ),
            Self::MarineTraffic => RequestSpec::proxied(
                "https://www.marinetraffic.com/en/ais/details/ships/mmsi:{id}",
                CONTENTS_PROXY,
                Envelope::ProxyContents,
            ),
            Self::VesselFinderSearch => RequestSpec::proxied(
                "https://www.vesselfinder.com/vessels?name={name}",
                CONTENTS_PROXY,
                Envelope::ProxyContents,
            ),
        }
    }

    /// Extraction rules for scraped sources. Empty for structured ones.
    pub fn rules(&self) -> Result<ExtractionRules, ExtractionError> {
        let builder = ExtractionRules::builder();
        match self {
            Self::MyShipTracking => builder
                .rule(Field::Latitude, r"([+-]?\d+\.\d+)°\s*/\s*[+-]?\d+\.\d+°")
                .rule(Field::Latitude, r"(?i)Latitude[:\s]+([+-]?\d+\.\d+)")
                .rule(Field::Longitude, r"[+-]?\d+\.\d+°\s*/\s*([+-]?\d+\.\d+)°")
                .rule(Field::Longitude, r"(?i)Longitude[:\s]+([+-]?\d+\.\d+)")
                .rule(Field::Speed, r"(?i)Speed[:\s]+([+-]?\d+\.?\d*)")
                .rule(Field::Speed, r"(?i)(\d+\.\d+)\s*Knots")
                .rule(Field::Course, r"(?i)Course[:\s]+([+-]?\d+)")
                .rule(Field::Course, r"(?i)°\s*Course[:\s]*(\d+)")
                .build(),
            Self::VesselFinder => builder.build(),
            Self::MarineTraffic => builder
                .rule(Field::Latitude, r#""lat":\s*([+-]?\d+\.\d+)"#)
                .rule(Field::Longitude, r#""lng":\s*([+-]?\d+\.\d+)"#)
                .rule(Field::Speed, r"Speed[^\d]*([\d.]+)\s*kn")
                .rule(Field::Course, r"Course[^\d]*([\d.]+)")
                .build(),
            Self::VesselFinderSearch => builder
                .rule(Field::Latitude, r#"latitude["']?\s*:?\s*["']?([+-]?\d+\.\d+)"#)
                .rule(Field::Longitude, r#"longitude["']?\s*:?\s*["']?([+-]?\d+\.\d+)"#)
                .rule(Field::Speed, r"speed[^\d]*([\d.]+)")
                .build(),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                ProviderError::Config(format!(
                    "unknown provider '{}' (expected one of: {})",
                    s.trim(),
                    Self::ALL.map(|k| k.as_str()).join(", ")
                ))
            })
    }
}
