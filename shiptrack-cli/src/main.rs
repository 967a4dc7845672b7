//! shiptrack CLI - Command-line interface
//!
//! Resolves the tracked vessel once, watches it periodically, or serves the
//! latest position over HTTP.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::history::HistoryArgs;
use commands::resolve::ResolveArgs;
use commands::serve::ServeArgs;
use commands::watch::WatchArgs;
use error::CliError;
use runner::CliRunner;
use shiptrack::config::config_file_path;

#[derive(Parser)]
#[command(name = "shiptrack")]
#[command(version = shiptrack::VERSION)]
#[command(about = "Track a single vessel across public AIS sources", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.shiptrack/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(long, global = true)]
    debug: bool,

    /// Keep position history in memory instead of writing it to disk
    #[arg(long, global = true)]
    no_persist: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the vessel once and print where it is
    Resolve(ResolveArgs),

    /// Refresh the position periodically until interrupted
    Watch(WatchArgs),

    /// Serve the latest position as JSON over HTTP
    Serve(ServeArgs),

    /// Show or clear the stored position history
    History(HistoryArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        config,
        debug,
        no_persist,
        command,
    } = cli;

    // Long-running commands mirror their logs to stdout.
    let runner = |stdout_logs| {
        let runner = CliRunner::new(config.as_deref(), stdout_logs, debug)?;
        Ok::<_, CliError>(if no_persist {
            runner.without_persistence()
        } else {
            runner
        })
    };

    match command {
        Commands::Resolve(args) => {
            let runner = runner(false)?;
            commands::resolve::run(&runner, args).await
        }
        Commands::Watch(args) => {
            let runner = runner(true)?;
            commands::watch::run(&runner, args).await
        }
        Commands::Serve(args) => {
            let runner = runner(true)?;
            commands::serve::run(&runner, args).await
        }
        Commands::History(args) => {
            let runner = runner(false)?;
            commands::history::run(&runner, args)
        }
        // Runs without logging so a broken file can still be replaced.
        Commands::Config(command) => {
            let path = config.clone().unwrap_or_else(config_file_path);
            commands::config::run(command, &path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "shiptrack",
            "resolve",
            "--json",
            "--config",
            "/tmp/c.ini",
            "--debug",
        ])
        .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.ini")));
        assert!(matches!(cli.command, Commands::Resolve(ResolveArgs { json: true, .. })));
    }

    #[test]
    fn test_no_persist_is_global() {
        let cli = Cli::try_parse_from(["shiptrack", "watch", "--no-persist"]).unwrap();
        assert!(cli.no_persist);
        assert!(matches!(cli.command, Commands::Watch(_)));

        let cli = Cli::try_parse_from(["shiptrack", "--no-persist", "serve"]).unwrap();
        assert!(cli.no_persist);

        let cli = Cli::try_parse_from(["shiptrack", "resolve"]).unwrap();
        assert!(!cli.no_persist);
    }

    #[test]
    fn test_watch_rejects_zero_delays() {
        assert!(Cli::try_parse_from(["shiptrack", "watch", "--interval", "0"]).is_err());
        assert!(Cli::try_parse_from(["shiptrack", "watch", "--retry", "0"]).is_err());

        let cli = Cli::try_parse_from(["shiptrack", "watch", "--interval", "60"]).unwrap();
        match cli.command {
            Commands::Watch(args) => assert_eq!(args.interval, Some(60)),
            _ => panic!("expected watch"),
        }
    }

    #[test]
    fn test_date_requires_links() {
        assert!(Cli::try_parse_from(["shiptrack", "resolve", "--date", "2025-06-01"]).is_err());
        assert!(Cli::try_parse_from([
            "shiptrack", "resolve", "--links", "--date", "2025-06-01"
        ])
        .is_ok());
    }

    #[test]
    fn test_serve_bind_parses_socket_addr() {
        let cli = Cli::try_parse_from(["shiptrack", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.bind, Some("0.0.0.0:9000".parse().unwrap()));
                assert!(!args.live_only);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_history_clear_conflicts_with_json() {
        assert!(Cli::try_parse_from(["shiptrack", "history", "--clear", "--json"]).is_err());
    }
}
