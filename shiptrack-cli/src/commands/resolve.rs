//! `shiptrack resolve` - resolve the vessel once.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use shiptrack::tracker::TrackerSnapshot;
use shiptrack::travel::FlightLinks;

use crate::commands::common::{print_links, print_snapshot};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the resolve command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print flight booking links to the nearest airport
    #[arg(long)]
    pub links: bool,

    /// Travel date for booking links (YYYY-MM-DD, default: tomorrow)
    #[arg(long, requires = "links")]
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct WithFlights<'a> {
    snapshot: &'a TrackerSnapshot,
    flights: &'a FlightLinks,
}

/// Run the resolve command.
pub async fn run(runner: &CliRunner, args: ResolveArgs) -> Result<(), CliError> {
    runner.log_startup("resolve");
    let tracker = runner.create_tracker()?;

    tracker.refresh().await;

    // A fresh tracker always has a snapshot after its first refresh.
    let Some(snapshot) = tracker.snapshot() else {
        return Ok(());
    };
    let links = if args.links {
        tracker.flight_links(args.date)
    } else {
        None
    };

    if args.json {
        let output = match &links {
            Some(flights) => serde_json::to_string_pretty(&WithFlights {
                snapshot: &snapshot,
                flights,
            })?,
            None => serde_json::to_string_pretty(&snapshot)?,
        };
        println!("{}", output);
        return Ok(());
    }

    print_snapshot(&snapshot, &runner.config().home.label);
    if let Some(links) = links {
        print_links(&links);
    }
    Ok(())
}
