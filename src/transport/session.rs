use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::http::HttpTransport;
use crate::error::{Result, WikiError};

/// Ordered query-string parameters of one MediaWiki API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// A connection to one MediaWiki site able to answer parameterized read requests.
pub trait ApiSession: Send + Sync {
    fn submit(&self, request: &ApiRequest) -> Result<Value>;
}

/// [`ApiSession`] over plain HTTP GETs against a site's `api.php`.
pub struct HttpApiSession {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
}

impl HttpApiSession {
    pub fn new(transport: Arc<dyn HttpTransport>, api_url: impl Into<String>) -> Self {
        Self {
            transport,
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl ApiSession for HttpApiSession {
    fn submit(&self, request: &ApiRequest) -> Result<Value> {
        debug!(
            api = %self.api_url,
            action = request.get("action").unwrap_or_default(),
            "submitting API request"
        );
        let response = self.transport.get(&self.api_url, request.params())?;
        if !response.is_success() {
            return Err(WikiError::Service(format!(
                "API request to {} failed with status {}",
                self.api_url, response.status
            )));
        }

        let payload: Value = serde_json::from_str(&response.body)?;
        if let Some((code, info)) = embedded_error(&payload) {
            return Err(WikiError::Api { code, info });
        }
        Ok(payload)
    }
}

/// Reads either the legacy `error` object or the `errors` list used with
/// `errorformat=plaintext`.
fn embedded_error(payload: &Value) -> Option<(String, String)> {
    if let Some(error) = payload.get("error") {
        return Some(error_fields(error, "info"));
    }
    payload
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .map(|error| error_fields(error, "text"))
}

fn error_fields(error: &Value, message_key: &str) -> (String, String) {
    let code = error
        .get("code")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let info = error
        .get(message_key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    (code, info)
}
