use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use super::http::{HttpResponse, HttpTransport};
use super::session::{ApiRequest, ApiSession};
use crate::error::{Result, WikiError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub content_type: Option<String>,
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Replays queued responses in order and records every request it receives.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn push_response(&self, response: HttpResponse) {
        self.responses.lock().push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    fn next(&self, request: RecordedRequest) -> Result<HttpResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| WikiError::Service("no mock response available".to_string()))
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse> {
        self.next(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            query: query.to_vec(),
            content_type: None,
            body: None,
        })
    }

    fn post(
        &self,
        url: &str,
        query: &[(String, String)],
        content_type: &str,
        body: String,
    ) -> Result<HttpResponse> {
        self.next(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            query: query.to_vec(),
            content_type: Some(content_type.to_string()),
            body: Some(body),
        })
    }
}

#[derive(Clone, Default)]
pub struct MockSession {
    responses: Arc<Mutex<VecDeque<Value>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockSession {
    pub fn push_response(&self, response: Value) {
        self.responses.lock().push_back(response);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }
}

impl ApiSession for MockSession {
    fn submit(&self, request: &ApiRequest) -> Result<Value> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| WikiError::Service("no mock response available".to_string()))
    }
}
