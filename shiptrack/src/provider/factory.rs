//! Construction of the ordered adapter list.

use std::sync::Arc;
use std::time::Duration;

use super::http::{AsyncHttpClient, ReqwestClient, DEFAULT_USER_AGENT};
use super::presets::ProviderKind;
use super::scraped::ScrapedAdapter;
use super::structured::{JsonFieldMap, StructuredAdapter};
use super::types::ProviderError;
use super::{PositionAdapter, DEFAULT_PROVIDER_TIMEOUT};

/// Settings shared by every built-in adapter.
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    /// Priority order; adapters are tried in this order.
    pub order: Vec<ProviderKind>,
    pub timeout: Duration,
    pub user_agent: String,
    /// Display name used in records and name-based searches.
    pub vessel_name: String,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            order: ProviderKind::default_order(),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            vessel_name: "RFA TIDESPRING".to_string(),
        }
    }
}

/// Build the adapters named in `settings.order`, sharing one reqwest client.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created or a preset's
/// rules fail to compile.
pub fn build_adapters(
    settings: &AdapterSettings,
) -> Result<Vec<Box<dyn PositionAdapter>>, ProviderError> {
    let client = Arc::new(ReqwestClient::new(settings.timeout, &settings.user_agent)?);
    build_adapters_with(settings, client)
}

/// Build adapters over an arbitrary HTTP client.
pub fn build_adapters_with<C>(
    settings: &AdapterSettings,
    client: Arc<C>,
) -> Result<Vec<Box<dyn PositionAdapter>>, ProviderError>
where
    C: AsyncHttpClient + 'static,
{
    let mut adapters: Vec<Box<dyn PositionAdapter>> = Vec::with_capacity(settings.order.len());

    for kind in &settings.order {
        let adapter: Box<dyn PositionAdapter> = if kind.is_structured() {
            Box::new(StructuredAdapter::new(
                kind.label(),
                Arc::clone(&client),
                kind.request(),
                JsonFieldMap::ais(),
                settings.vessel_name.as_str(),
                settings.timeout,
            ))
        } else {
            let rules = kind
                .rules()
                .map_err(|e| ProviderError::Config(format!("{}: {}", kind, e)))?;
            Box::new(ScrapedAdapter::new(
                kind.label(),
                Arc::clone(&client),
                kind.request(),
                rules,
                settings.vessel_name.as_str(),
                settings.timeout,
            ))
        };
        adapters.push(adapter);
    }

    tracing::debug!(
        count = adapters.len(),
        order = ?settings.order.iter().map(|k| k.as_str()).collect::<Vec<_>>(),
        "Built provider adapters"
    );

    Ok(adapters)
}
