//! Request construction and response envelopes.

use serde::Deserialize;
use url::form_urlencoded;

use super::types::ProviderError;

/// How the payload is wrapped in the HTTP response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// The body is the payload.
    Raw,
    /// The body is a CORS-proxy JSON wrapper; the payload is its
    /// `contents` string.
    ProxyContents,
}

#[derive(Deserialize)]
struct ProxyWrapper {
    contents: Option<String>,
}

/// Where and how to request one provider's data.
///
/// The URL template may contain `{id}` (the target id) and `{name}` (the
/// vessel display name); both are form-urlencoded on substitution. When a
/// proxy prefix is set the rendered URL is encoded once more and appended to
/// the prefix.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url_template: String,
    pub proxy_prefix: Option<String>,
    pub envelope: Envelope,
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    /// Direct request, raw body.
    pub fn direct(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            proxy_prefix: None,
            envelope: Envelope::Raw,
            headers: Vec::new(),
        }
    }

    /// Request routed through a CORS proxy.
    pub fn proxied(
        url_template: impl Into<String>,
        proxy_prefix: impl Into<String>,
        envelope: Envelope,
    ) -> Self {
        Self {
            url_template: url_template.into(),
            proxy_prefix: Some(proxy_prefix.into()),
            envelope,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Build the final request URL.
    pub fn render_url(&self, target_id: &str, vessel_name: &str) -> String {
        let url = self
            .url_template
            .replace("{id}", &encode(target_id))
            .replace("{name}", &encode(vessel_name));

        match &self.proxy_prefix {
            Some(prefix) => format!("{}{}", prefix, encode(&url)),
            None => url,
        }
    }

    pub fn header_pairs(&self) -> Vec<(&str, &str)> {
        self.headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Strip the envelope and return the payload text.
    pub fn unwrap_payload(&self, body: &[u8]) -> Result<String, ProviderError> {
        let text = String::from_utf8_lossy(body);
        match self.envelope {
            Envelope::Raw => Ok(text.into_owned()),
            Envelope::ProxyContents => {
                let wrapper: ProxyWrapper = serde_json::from_str(&text).map_err(|e| {
                    ProviderError::InvalidResponse(format!("Bad proxy wrapper: {}", e))
                })?;
                wrapper
                    .contents
                    .filter(|c| !c.trim().is_empty())
                    .ok_or_else(|| ProviderError::InvalidResponse("Proxy returned no contents".into()))
            }
        }
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
