//! Position data providers.
//!
//! Every third-party source is wrapped in an adapter implementing
//! [`PositionAdapter`]. An adapter turns a target id into a normalized
//! [`PositionRecord`], or `None` when the source is unreachable, slow, or
//! returned something unusable. Errors never cross the adapter boundary:
//! they are logged and converted to `None` so the resolver moves on.
//!
//! # Adapter shapes
//!
//! - [`StructuredAdapter`] - JSON responses mapped field by field
//! - [`ScrapedAdapter`] - HTML/text responses run through
//!   [`ExtractionRules`](crate::extraction::ExtractionRules)
//!
//! # Built-in sources
//!
//! | Kind | Shape | Notes |
//! |------|-------|-------|
//! | `myshiptracking` | scraped | direct HTML |
//! | `vesselfinder` | structured | click API via raw CORS proxy |
//! | `marinetraffic` | scraped | details page via JSON CORS proxy |
//! | `vesselfinder_search` | scraped | name search via JSON CORS proxy |

mod factory;
mod http;
mod presets;
mod request;
mod scraped;
mod structured;
mod types;

pub use factory::{build_adapters, build_adapters_with, AdapterSettings};
pub use http::{AsyncHttpClient, ReqwestClient, DEFAULT_USER_AGENT};
pub use presets::{ProviderKind, CONTENTS_PROXY, RAW_PROXY};
pub use request::{Envelope, RequestSpec};
pub use scraped::ScrapedAdapter;
pub use structured::{JsonFieldMap, StructuredAdapter};
pub use types::ProviderError;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::position::PositionRecord;

/// Boxed future returned by object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Default per-request budget for a provider.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(8);

/// A source of vessel positions.
///
/// Object-safe so the resolver can hold an ordered `Vec<Box<dyn PositionAdapter>>`.
pub trait PositionAdapter: Send + Sync {
    /// Source label written into every record this adapter produces.
    fn name(&self) -> &str;

    /// Fetch the current position of `target_id`.
    ///
    /// Returns `None` on any network, timeout or parse failure. Returned
    /// records always satisfy [`PositionRecord::is_resolved`].
    fn fetch<'a>(&'a self, target_id: &'a str) -> BoxFuture<'a, Option<PositionRecord>>;
}

/// Run an adapter's fallible fetch under its time budget and collapse the
/// outcome to `Option`, logging the reason for any failure.
pub(crate) async fn settle<F>(provider: &str, budget: Duration, attempt: F) -> Option<PositionRecord>
where
    F: Future<Output = Result<PositionRecord, ProviderError>>,
{
    let result = match tokio::time::timeout(budget, attempt).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(budget)),
    };

    match result {
        Ok(record) if record.is_resolved() => Some(record),
        Ok(record) => {
            tracing::warn!(
                provider,
                latitude = record.latitude,
                longitude = record.longitude,
                "Provider returned an unresolved position"
            );
            None
        }
        Err(e) => {
            tracing::warn!(provider, error = %e, "Provider fetch failed");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles shared by the adapter tests.

    use super::*;
    use parking_lot::Mutex;

    /// Mock HTTP client returning a canned response and recording URLs.
    pub struct MockHttpClient {
        pub response: Result<Vec<u8>, ProviderError>,
        pub delay: Option<Duration>,
        pub requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl MockHttpClient {
        pub fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.as_bytes().to_vec()),
                delay: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn err(error: ProviderError) -> Self {
            Self {
                response: Err(error),
                delay: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn slow(body: &str, delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::ok(body)
            }
        }

        pub fn last_url(&self) -> Option<String> {
            self.requests.lock().last().map(|(url, _)| url.clone())
        }

        pub fn last_headers(&self) -> Vec<(String, String)> {
            self.requests
                .lock()
                .last()
                .map(|(_, headers)| headers.clone())
                .unwrap_or_default()
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        async fn get_with_headers(
            &self,
            url: &str,
            headers: &[(&str, &str)],
        ) -> Result<Vec<u8>, ProviderError> {
            self.requests.lock().push((
                url.to_string(),
                headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.response.clone()
        }
    }
}
