//! Built-in airport table.

use super::Airport;

/// (code, name, latitude, longitude, city)
const BUILTIN: &[(&str, &str, f64, f64, &str)] = &[
    // Mediterranean and Iberia
    ("MAD", "Madrid Barajas", 40.4719, -3.5626, "Madrid"),
    ("BCN", "Barcelona El Prat", 41.2971, 2.0785, "Barcelona"),
    ("FCO", "Rome Fiumicino", 41.8003, 12.2389, "Rome"),
    ("NCE", "Nice Côte d'Azur", 43.6584, 7.2159, "Nice"),
    ("MRS", "Marseille Provence", 43.4393, 5.2214, "Marseille"),
    ("PMI", "Palma de Mallorca", 39.5517, 2.7388, "Palma"),
    ("LIS", "Lisbon Portela", 38.7813, -9.1361, "Lisbon"),
    ("GIB", "Gibraltar", 36.1512, -5.3467, "Gibraltar"),
    ("MLA", "Malta International", 35.8575, 14.4775, "Malta"),
    // East Asia
    ("ICN", "Seoul Incheon", 37.4691, 126.4505, "Seoul"),
    ("HND", "Tokyo Haneda", 35.5494, 139.7798, "Tokyo"),
    ("NRT", "Tokyo Narita", 35.7720, 140.3929, "Tokyo"),
    ("KIX", "Osaka Kansai", 34.4348, 135.2440, "Osaka"),
    ("PUS", "Busan Gimhae", 35.1795, 128.9382, "Busan"),
    ("FUK", "Fukuoka", 33.5859, 130.4451, "Fukuoka"),
];

pub(super) fn builtin_airports() -> Vec<Airport> {
    BUILTIN
        .iter()
        .map(|&(code, name, lat, lon, city)| Airport::new(code, name, lat, lon, city))
        .collect()
}
