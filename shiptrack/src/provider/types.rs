//! Provider error types.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching from a provider.
///
/// These never escape an adapter; they exist so failures can be logged with
/// a reason before the adapter reports `None`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Connection or transport failure.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The request exceeded its time budget.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Payload could not be decoded or lacked required fields.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Payload decoded but yielded no usable coordinate pair.
    #[error("No position fix in response from {0}")]
    NoFix(String),

    /// Adapter could not be constructed.
    #[error("Provider configuration error: {0}")]
    Config(String),
}
