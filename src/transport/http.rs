use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use tracing::debug;

use crate::config::{WikiConfig, DEFAULT_USER_AGENT};
use crate::error::{Result, WikiError};

pub const SPARQL_QUERY_CONTENT_TYPE: &str = "application/sparql-query";

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP primitive the clients are built on.
///
/// Non-2xx statuses are returned as responses, not errors: each caller decides
/// what a bad status means for its own operation.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse>;

    fn post(
        &self,
        url: &str,
        query: &[(String, String)],
        content_type: &str,
        body: String,
    ) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    client: HttpClient,
}

impl ReqwestTransport {
    pub fn new(config: &WikiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );

        let client = HttpClient::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|err| WikiError::Config(format!("cannot build HTTP client: {err}")))?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse> {
        debug!(url, params = query.len(), "GET");
        let response = self.client.get(url).query(query).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }

    fn post(
        &self,
        url: &str,
        query: &[(String, String)],
        content_type: &str,
        body: String,
    ) -> Result<HttpResponse> {
        debug!(url, content_type, bytes = body.len(), "POST");
        let response = self
            .client
            .post(url)
            .query(query)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}
