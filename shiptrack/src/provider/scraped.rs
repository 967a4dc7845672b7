//! Adapter for sources that only offer HTML or free text.

use std::sync::Arc;
use std::time::Duration;

use super::http::AsyncHttpClient;
use super::request::RequestSpec;
use super::types::ProviderError;
use super::{settle, BoxFuture, PositionAdapter};
use crate::extraction::{extract, ExtractionRules};
use crate::position::PositionRecord;

/// Status used when a scraped page yields a fix but no status text.
pub const DEFAULT_SCRAPED_STATUS: &str = "At sea";

/// Adapter that fetches a page and runs [`ExtractionRules`] over it.
pub struct ScrapedAdapter<C: AsyncHttpClient> {
    name: String,
    http_client: Arc<C>,
    request: RequestSpec,
    rules: ExtractionRules,
    vessel_name: String,
    timeout: Duration,
}

impl<C: AsyncHttpClient> ScrapedAdapter<C> {
    pub fn new(
        name: impl Into<String>,
        http_client: Arc<C>,
        request: RequestSpec,
        rules: ExtractionRules,
        vessel_name: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            http_client,
            request,
            rules,
            vessel_name: vessel_name.into(),
            timeout,
        }
    }

    async fn try_fetch(&self, target_id: &str) -> Result<PositionRecord, ProviderError> {
        let url = self.request.render_url(target_id, &self.vessel_name);
        tracing::debug!(provider = %self.name, url = %url, "Fetching page");

        let body = self
            .http_client
            .get_with_headers(&url, &self.request.header_pairs())
            .await?;
        let payload = self.request.unwrap_payload(&body)?;

        let partial = extract(&payload, &self.rules);
        let fix = partial.fix().ok_or_else(|| {
            ProviderError::NoFix(format!(
                "latitude={:?} longitude={:?}",
                partial.latitude, partial.longitude
            ))
        })?;

        let status = partial
            .status
            .unwrap_or_else(|| DEFAULT_SCRAPED_STATUS.to_string());

        Ok(PositionRecord::new(
            target_id,
            self.vessel_name.as_str(),
            fix.latitude,
            fix.longitude,
            self.name.as_str(),
        )
        .with_speed(partial.speed.unwrap_or(0.0))
        .with_course(partial.course.unwrap_or(0.0))
        .with_status(status))
    }
}

impl<C: AsyncHttpClient + 'static> PositionAdapter for ScrapedAdapter<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch<'a>(&'a self, target_id: &'a str) -> BoxFuture<'a, Option<PositionRecord>> {
        Box::pin(settle(&self.name, self.timeout, self.try_fetch(target_id)))
    }
}
