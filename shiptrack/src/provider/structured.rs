//! Adapter for sources that return structured JSON.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::http::AsyncHttpClient;
use super::request::RequestSpec;
use super::types::ProviderError;
use super::{settle, BoxFuture, PositionAdapter};
use crate::position::timestamp::{from_unix_seconds, parse_timestamp};
use crate::position::PositionRecord;

/// JSON pointers (RFC 6901) locating each field in a response document.
///
/// Numeric fields accept either JSON numbers or numeric strings.
#[derive(Debug, Clone)]
pub struct JsonFieldMap {
    pub latitude: String,
    pub longitude: String,
    pub speed: Option<String>,
    pub course: Option<String>,
    pub timestamp: Option<String>,
    pub status: Option<String>,
}

impl JsonFieldMap {
    /// Map for documents shaped like `{"AIS": {"LATITUDE": .., ...}}`.
    pub fn ais() -> Self {
        Self {
            latitude: "/AIS/LATITUDE".to_string(),
            longitude: "/AIS/LONGITUDE".to_string(),
            speed: Some("/AIS/SPEED".to_string()),
            course: Some("/AIS/COURSE".to_string()),
            timestamp: Some("/AIS/TIMESTAMP".to_string()),
            status: Some("/AIS/STATUS".to_string()),
        }
    }

    /// Map a parsed document onto a record.
    ///
    /// Fails when either coordinate is missing or not numeric. Optional
    /// fields fall back to zero, capture time, and "Unknown".
    pub fn apply(
        &self,
        doc: &Value,
        mmsi: &str,
        vessel_name: &str,
        source: &str,
    ) -> Result<PositionRecord, ProviderError> {
        let latitude = number_at(doc, &self.latitude).ok_or_else(|| {
            ProviderError::NoFix(format!("no numeric value at {}", self.latitude))
        })?;
        let longitude = number_at(doc, &self.longitude).ok_or_else(|| {
            ProviderError::NoFix(format!("no numeric value at {}", self.longitude))
        })?;

        let optional = |pointer: &Option<String>| pointer.as_deref().and_then(|p| number_at(doc, p));

        let mut record = PositionRecord::new(mmsi, vessel_name, latitude, longitude, source)
            .with_speed(optional(&self.speed).unwrap_or(0.0))
            .with_course(optional(&self.course).unwrap_or(0.0));

        if let Some(status) = self.status.as_deref().and_then(|p| text_at(doc, p)) {
            record = record.with_status(status);
        }

        if let Some(pointer) = self.timestamp.as_deref() {
            let parsed = match doc.pointer(pointer) {
                Some(Value::String(s)) => parse_timestamp(s),
                Some(Value::Number(n)) => n.as_i64().and_then(from_unix_seconds),
                _ => None,
            };
            if let Some(ts) = parsed {
                record = record.with_timestamp(ts);
            }
        }

        Ok(record)
    }
}

fn number_at(doc: &Value, pointer: &str) -> Option<f64> {
    match doc.pointer(pointer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn text_at(doc: &Value, pointer: &str) -> Option<String> {
    match doc.pointer(pointer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Adapter that fetches a JSON document and maps it with a [`JsonFieldMap`].
pub struct StructuredAdapter<C: AsyncHttpClient> {
    name: String,
    http_client: Arc<C>,
    request: RequestSpec,
    fields: JsonFieldMap,
    vessel_name: String,
    timeout: Duration,
}

impl<C: AsyncHttpClient> StructuredAdapter<C> {
    pub fn new(
        name: impl Into<String>,
        http_client: Arc<C>,
        request: RequestSpec,
        fields: JsonFieldMap,
        vessel_name: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            http_client,
            request,
            fields,
            vessel_name: vessel_name.into(),
            timeout,
        }
    }

    async fn try_fetch(&self, target_id: &str) -> Result<PositionRecord, ProviderError> {
        let url = self.request.render_url(target_id, &self.vessel_name);
        tracing::debug!(provider = %self.name, url = %url, "Fetching structured position");

        let body = self
            .http_client
            .get_with_headers(&url, &self.request.header_pairs())
            .await?;
        let payload = self.request.unwrap_payload(&body)?;
        let doc: Value = serde_json::from_str(&payload)
            .map_err(|e| ProviderError::InvalidResponse(format!("Invalid JSON: {}", e)))?;

        self.fields
            .apply(&doc, target_id, &self.vessel_name, &self.name)
    }
}

impl<C: AsyncHttpClient + 'static> PositionAdapter for StructuredAdapter<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch<'a>(&'a self, target_id: &'a str) -> BoxFuture<'a, Option<PositionRecord>> {
        Box::pin(settle(&self.name, self.timeout, self.try_fetch(target_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::MockHttpClient;
    use crate::provider::Envelope;
    use serde_json::json;

    fn adapter(client: MockHttpClient) -> (StructuredAdapter<MockHttpClient>, Arc<MockHttpClient>) {
        let client = Arc::new(client);
        let adapter = StructuredAdapter::new(
            "VesselFinder",
            Arc::clone(&client),
            RequestSpec::direct("https://api.test/click/{id}"),
            JsonFieldMap::ais(),
            "RFA TIDESPRING",
            Duration::from_secs(1),
        );
        (adapter, client)
    }

    #[test]
    fn test_apply_numeric_fields() {
        let doc = json!({"AIS": {
            "LATITUDE": 35.08466, "LONGITUDE": 129.10211,
            "SPEED": 12.5, "COURSE": 370.0, "STATUS": "Under way"
        }});
        let record = JsonFieldMap::ais().apply(&doc, "1", "V", "VF").unwrap();
        assert_eq!(record.latitude, 35.08466);
        assert_eq!(record.longitude, 129.10211);
        assert_eq!(record.speed, 12.5);
        assert_eq!(record.course, 10.0);
        assert_eq!(record.status, "Under way");
        assert_eq!(record.source, "VF");
        assert!(record.is_live());
    }

    #[test]
    fn test_apply_string_fields() {
        let doc = json!({"AIS": {"LATITUDE": "35.1", "LONGITUDE": "-5.3", "SPEED": "n/a"}});
        let record = JsonFieldMap::ais().apply(&doc, "1", "V", "VF").unwrap();
        assert_eq!(record.latitude, 35.1);
        assert_eq!(record.longitude, -5.3);
        assert_eq!(record.speed, 0.0);
        assert_eq!(record.status, "Unknown");
    }

    #[test]
    fn test_apply_timestamp_forms() {
        let doc = json!({"AIS": {"LATITUDE": 1.5, "LONGITUDE": 2.5, "TIMESTAMP": "2024-03-01T12:00:00Z"}});
        let record = JsonFieldMap::ais().apply(&doc, "1", "V", "VF").unwrap();
        assert_eq!(record.timestamp.to_rfc3339(), "2024-03-01T12:00:00+00:00");

        let doc = json!({"AIS": {"LATITUDE": 1.5, "LONGITUDE": 2.5, "TIMESTAMP": 1709294400}});
        let record = JsonFieldMap::ais().apply(&doc, "1", "V", "VF").unwrap();
        assert_eq!(record.timestamp.timestamp(), 1709294400);
    }

    #[test]
    fn test_apply_missing_longitude() {
        let doc = json!({"AIS": {"LATITUDE": 35.0}});
        assert!(matches!(
            JsonFieldMap::ais().apply(&doc, "1", "V", "VF"),
            Err(ProviderError::NoFix(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let (adapter, client) =
            adapter(MockHttpClient::ok(r#"{"AIS":{"LATITUDE":35.08,"LONGITUDE":129.1}}"#));
        let record = adapter.fetch("235109357").await.unwrap();
        assert_eq!(record.mmsi, "235109357");
        assert_eq!(record.name, "RFA TIDESPRING");
        assert_eq!(client.last_url().unwrap(), "https://api.test/click/235109357");
    }

    #[tokio::test]
    async fn test_fetch_out_of_range_is_none() {
        let (adapter, _) =
            adapter(MockHttpClient::ok(r#"{"AIS":{"LATITUDE":135.0,"LONGITUDE":129.1}}"#));
        assert!(adapter.fetch("1").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_http_error_is_none() {
        let (adapter, _) = adapter(MockHttpClient::err(ProviderError::HttpStatus {
            status: 403,
            url: "x".into(),
        }));
        assert!(adapter.fetch("1").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_malformed_json_is_none() {
        let (adapter, _) = adapter(MockHttpClient::ok("<html>blocked</html>"));
        assert!(adapter.fetch("1").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_through_proxy_wrapper() {
        let client = Arc::new(MockHttpClient::ok(
            r#"{"contents":"{\"AIS\":{\"LATITUDE\":10.5,\"LONGITUDE\":20.5}}"}"#,
        ));
        let adapter = StructuredAdapter::new(
            "Proxy",
            Arc::clone(&client),
            RequestSpec::proxied("https://api.test/{id}", "https://p.test/get?url=", Envelope::ProxyContents),
            JsonFieldMap::ais(),
            "V",
            Duration::from_secs(1),
        );
        let record = adapter.fetch("7").await.unwrap();
        assert_eq!(record.latitude, 10.5);
        assert!(client.last_url().unwrap().starts_with("https://p.test/get?url=https%3A"));
    }
}
