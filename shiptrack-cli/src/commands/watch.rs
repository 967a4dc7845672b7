//! `shiptrack watch` - refresh periodically until interrupted.
//!
//! A non-live result schedules a retry after `[watch] retry` seconds instead
//! of waiting for the full interval.

use std::time::Duration;

use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::commands::common::print_snapshot;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the watch command.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between refreshes (overrides [watch] interval)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Seconds before retrying after a non-live result (overrides [watch] retry)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub retry: Option<u64>,
}

/// Run the watch command.
pub async fn run(runner: &CliRunner, args: WatchArgs) -> Result<(), CliError> {
    runner.log_startup("watch");
    let tracker = runner.create_tracker()?;

    let interval = Duration::from_secs(args.interval.unwrap_or(runner.config().watch.interval));
    let retry = Duration::from_secs(args.retry.unwrap_or(runner.config().watch.retry));

    let shutdown = CancellationToken::new();
    spawn_ctrl_c_handler(shutdown.clone());

    info!(
        interval_secs = interval.as_secs(),
        retry_secs = retry.as_secs(),
        "Watching vessel"
    );

    loop {
        let wait = match tracker.refresh().await {
            Some(record) if record.is_live() => interval,
            Some(record) => {
                warn!(
                    source = %record.source,
                    retry_secs = retry.as_secs(),
                    "No live position, retrying early"
                );
                retry
            }
            None => retry,
        };

        if let Some(snapshot) = tracker.snapshot() {
            println!();
            print_snapshot(&snapshot, &runner.config().home.label);
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(wait) => {}
        }
    }

    info!("Watch stopped");
    Ok(())
}

/// Cancel `token` on Ctrl-C.
pub fn spawn_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            token.cancel();
        }
    });
}
