//! `shiptrack history` - inspect or clear the position history.

use clap::Args;

use shiptrack::history::{HistoryBlob, PositionHistory};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the history command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Delete all stored entries
    #[arg(long, conflicts_with_all = ["json", "limit"])]
    pub clear: bool,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,

    /// Show only the newest N entries
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Run the history command.
pub fn run(runner: &CliRunner, args: HistoryArgs) -> Result<(), CliError> {
    runner.log_startup("history");
    let config = runner.config();
    let blob = config.history_blob();
    let location = blob.describe();
    let mut history = PositionHistory::load(Box::new(blob), config.history.max_entries);

    if args.clear {
        let count = history.len();
        history.reset()?;
        println!("Cleared {} entries from {}", count, location);
        return Ok(());
    }

    let entries = history.all();
    let skip = args
        .limit
        .map_or(0, |limit| entries.len().saturating_sub(limit));
    let shown = &entries[skip..];

    if args.json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No positions recorded yet ({})", location);
        return Ok(());
    }

    println!(
        "{} of {} entries (max {}) from {}",
        shown.len(),
        entries.len(),
        history.max_entries(),
        location
    );
    println!();
    for entry in shown {
        println!(
            "  {}  {:>9.4} {:>10.4}  {:>6.0} mi  {:>5.1} kn",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.latitude,
            entry.longitude,
            entry.distance,
            entry.speed
        );
    }
    Ok(())
}
