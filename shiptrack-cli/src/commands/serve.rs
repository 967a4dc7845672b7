//! `shiptrack serve` - run the HTTP endpoint.

use std::net::SocketAddr;

use clap::Args;
use tokio_util::sync::CancellationToken;

use shiptrack::server::{self, ServerState};

use crate::commands::watch::spawn_ctrl_c_handler;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the serve command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides [server] bind)
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Answer 404 unless a provider returned a live position
    #[arg(long)]
    pub live_only: bool,
}

/// Run the serve command.
pub async fn run(runner: &CliRunner, args: ServeArgs) -> Result<(), CliError> {
    runner.log_startup("serve");
    let tracker = runner.create_tracker()?;

    let settings = &runner.config().server;
    let addr = args.bind.unwrap_or(settings.bind);
    let state = ServerState {
        tracker,
        serve_fallback: settings.serve_fallback && !args.live_only,
    };

    let shutdown = CancellationToken::new();
    spawn_ctrl_c_handler(shutdown.clone());

    println!("Serving vessel data on http://{}/ship-data", addr);
    println!("Press Ctrl+C to stop");

    server::serve(addr, state, async move { shutdown.cancelled().await }).await?;
    Ok(())
}
