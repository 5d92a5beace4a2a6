use super::decode;
use crate::error::Result;
use http::header::{HeaderMap, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A fully received HTTP response.
///
/// The body is read eagerly so assertions can inspect it any number of times.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    uri: String,
    status: u16,
    headers: HeaderMap,
    body: String,
}

impl ApiResponse {
    pub fn new(uri: impl Into<String>, status: u16, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            status,
            headers,
            body: body.into(),
        }
    }

    /// The URI the request was sent to.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value by case-insensitive name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// True for a blank body or an empty JSON object.
    pub fn is_body_empty(&self) -> bool {
        let trimmed = self.body.trim();
        trimmed.is_empty() || trimmed == "{}"
    }

    /// The body as untyped JSON, for path-based assertions.
    pub fn json(&self) -> Result<Value> {
        decode(&self.body)
    }

    /// The body decoded into a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        decode(&self.body)
    }
}
