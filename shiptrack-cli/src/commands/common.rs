//! Output helpers shared by the command handlers.

use shiptrack::position::PositionQuality;
use shiptrack::tracker::TrackerSnapshot;
use shiptrack::travel::FlightLinks;

/// Print a human-readable summary of a snapshot.
pub fn print_snapshot(snapshot: &TrackerSnapshot, home_label: &str) {
    let record = &snapshot.record;

    println!("{} ({})", record.name, record.mmsi);
    println!(
        "  Position: {:.5}, {:.5} ({})",
        record.latitude, record.longitude, snapshot.sea_area
    );
    println!("  Speed:    {:.1} kn", record.speed);
    println!("  Course:   {:.0}°", record.course);
    println!("  Status:   {}", record.status);
    println!("  Source:   {} [{}]", record.source, snapshot.quality());
    println!(
        "  Reported: {}",
        record.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    println!("  Distance: {:.0} mi from {}", snapshot.distance, home_label);

    if let Some(nearest) = &snapshot.nearest_airport {
        println!(
            "  Airport:  {} {} ({:.0} mi)",
            nearest.airport.code, nearest.airport.name, nearest.distance
        );
    }
    if let Some(travel) = &snapshot.travel {
        println!("  Travel:   {} to get there", travel.formatted);
    }

    match snapshot.quality() {
        PositionQuality::Live => {}
        PositionQuality::LastKnown => {
            println!();
            println!("No provider answered; showing the last known position.");
        }
        PositionQuality::Estimated => {
            println!();
            println!("No provider answered and there is no history; showing an estimate.");
        }
    }
}

/// Print outbound and return booking links.
pub fn print_links(links: &FlightLinks) {
    println!();
    println!("Flights on {}", links.date);
    for (label, leg) in [("Outbound", &links.outbound), ("Return", &links.inbound)] {
        println!(
            "  {}: {} → {} ({}, ~£{})",
            label, leg.departure, leg.arrival, leg.duration, leg.estimated_price
        );
        println!("    Skyscanner: {}", leg.skyscanner_url);
        println!("    Google:     {}", leg.google_url);
        println!("    Kayak:      {}", leg.kayak_url);
    }
}
