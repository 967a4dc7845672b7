//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use shiptrack::airport::AirportFileError;
use shiptrack::config::ConfigFileError;
use shiptrack::history::HistoryError;
use shiptrack::provider::ProviderError;
use shiptrack::server::ServerError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be read or is invalid
    Config(ConfigFileError),
    /// Provider adapters could not be built
    Providers(ProviderError),
    /// Airport list could not be loaded
    Airports(AirportFileError),
    /// History could not be cleared
    History(HistoryError),
    /// HTTP server error
    Serve(ServerError),
    /// Failed to render output
    Output(serde_json::Error),
    /// Failed to write a file
    FileWrite { path: PathBuf, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Check the file with: shiptrack config show");
                eprintln!("Or write a fresh one with: shiptrack config init --force");
            }
            CliError::Serve(ServerError::Bind { .. }) => {
                eprintln!();
                eprintln!("Another process may be using the port.");
                eprintln!("Pick a different address with --bind or [server] bind.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Providers(e) => write!(f, "Failed to set up providers: {}", e),
            CliError::Airports(e) => write!(f, "Failed to load airports: {}", e),
            CliError::History(e) => write!(f, "History error: {}", e),
            CliError::Serve(e) => write!(f, "{}", e),
            CliError::Output(e) => write!(f, "Failed to render output: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Providers(e) => Some(e),
            CliError::Airports(e) => Some(e),
            CliError::History(e) => Some(e),
            CliError::Serve(e) => Some(e),
            CliError::Output(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Providers(e)
    }
}

impl From<AirportFileError> for CliError {
    fn from(e: AirportFileError) -> Self {
        CliError::Airports(e)
    }
}

impl From<HistoryError> for CliError {
    fn from(e: HistoryError) -> Self {
        CliError::History(e)
    }
}

impl From<ServerError> for CliError {
    fn from(e: ServerError) -> Self {
        CliError::Serve(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}
