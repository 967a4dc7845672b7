//! Flight search deep links.

use chrono::NaiveDate;
use serde::Serialize;

use super::flights::FlightTable;
use crate::airport::Airport;

/// Search links and typical figures for one direction of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingLinks {
    pub departure: String,
    pub arrival: String,
    pub skyscanner_url: String,
    pub google_url: String,
    pub kayak_url: String,
    pub duration: String,
    pub estimated_price: u32,
}

/// Outbound and return links between the home airport and a destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightLinks {
    pub date: NaiveDate,
    pub outbound: BookingLinks,
    #[serde(rename = "return")]
    pub inbound: BookingLinks,
}

impl FlightLinks {
    /// Build links for `date` between `origin` (code and city) and `airport`.
    pub fn new(
        origin_code: &str,
        origin_city: &str,
        airport: &Airport,
        date: NaiveDate,
        flights: &FlightTable,
    ) -> Self {
        let day = date.format("%Y-%m-%d").to_string();
        let origin = origin_code.to_ascii_uppercase();
        let dest = airport.code.to_ascii_uppercase();

        let leg = |from: &str, from_city: &str, to: &str, to_city: &str| BookingLinks {
            departure: from.to_string(),
            arrival: to.to_string(),
            skyscanner_url: format!(
                "https://www.skyscanner.com/flights/{}/{}/{}",
                from.to_ascii_lowercase(),
                to.to_ascii_lowercase(),
                day
            ),
            google_url: format!(
                "https://www.google.com/flights?f=0&gl=uk&hl=en&curr=GBP&q=Flights%20from%20{}%20to%20{}%20on%20{}",
                encode_query(from_city),
                encode_query(to_city),
                day
            ),
            kayak_url: format!("https://www.kayak.com/flights/{}-{}/{}", from, to, day),
            duration: flights.duration(from, to).to_string(),
            estimated_price: flights.price(from, to),
        };

        Self {
            date,
            outbound: leg(&origin, origin_city, &dest, &airport.city),
            inbound: leg(&dest, &airport.city, &origin, origin_city),
        }
    }
}

fn encode_query(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> FlightLinks {
        let airport = Airport::new("ICN", "Seoul Incheon", 37.4691, 126.4505, "Seoul");
        let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        FlightLinks::new("LHR", "London", &airport, date, &FlightTable::builtin())
    }

    #[test]
    fn test_outbound_links() {
        let out = links().outbound;
        assert_eq!(out.departure, "LHR");
        assert_eq!(out.arrival, "ICN");
        assert_eq!(out.skyscanner_url, "https://www.skyscanner.com/flights/lhr/icn/2024-06-02");
        assert_eq!(
            out.google_url,
            "https://www.google.com/flights?f=0&gl=uk&hl=en&curr=GBP&q=Flights%20from%20London%20to%20Seoul%20on%202024-06-02"
        );
        assert_eq!(out.kayak_url, "https://www.kayak.com/flights/LHR-ICN/2024-06-02");
        assert_eq!(out.duration, "11h 30m");
        assert_eq!(out.estimated_price, 650);
    }

    #[test]
    fn test_return_links() {
        let back = links().inbound;
        assert_eq!(back.skyscanner_url, "https://www.skyscanner.com/flights/icn/lhr/2024-06-02");
        assert_eq!(back.kayak_url, "https://www.kayak.com/flights/ICN-LHR/2024-06-02");
        assert!(back.google_url.contains("from%20Seoul%20to%20London"));
        assert_eq!(back.duration, "12h 45m");
        assert_eq!(back.estimated_price, 680);
    }

    #[test]
    fn test_city_with_space_is_encoded() {
        let airport = Airport::new("PMI", "Palma de Mallorca", 39.55, 2.74, "Palma de Mallorca");
        let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let l = FlightLinks::new("LHR", "London", &airport, date, &FlightTable::builtin());
        assert!(l.outbound.google_url.contains("to%20Palma%20de%20Mallorca%20on"));
    }

    #[test]
    fn test_serializes_return_key() {
        let json = serde_json::to_value(links()).unwrap();
        assert!(json.get("return").is_some());
        assert!(json["outbound"].get("skyscannerUrl").is_some());
    }
}
