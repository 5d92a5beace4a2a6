use crate::error::{Result, VerifyError};
use crate::runtime_config::{self, RuntimeConfig};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::blocking::Client;
use std::time::Duration;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Pre-configured, immutable request defaults.
///
/// Cloning is cheap: the underlying client is reference counted.
#[derive(Debug, Clone)]
pub struct RequestContext {
    root_uri: String,
    headers: HeaderMap,
    content_type: String,
    timeout: Duration,
    client: Client,
}

/// A context built from the installed process-wide configuration.
///
/// Fails with a configuration error when nothing has been installed.
pub fn new_request() -> Result<RequestContext> {
    RequestContext::from_config(runtime_config::current()?)
}

impl RequestContext {
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VerifyError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            root_uri: config.root_uri(),
            headers,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            timeout: config.timeout,
            client,
        })
    }

    /// A copy of this context with one more default header.
    pub fn with_header(&self, name: &str, value: &str) -> Result<Self> {
        let (name, value) = parse_header(name, value)?;
        let mut next = self.clone();
        next.headers.insert(name, value);
        Ok(next)
    }

    /// A copy of this context sending bodies with a different content type.
    pub fn with_content_type(&self, content_type: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.content_type = content_type.into();
        next
    }

    /// Absolute URI for a route path, which may carry a query string.
    pub fn uri_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.root_uri.clone()
        } else {
            format!("{}/{}", self.root_uri, path)
        }
    }

    pub fn root_uri(&self) -> &str {
        &self.root_uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| VerifyError::Config(format!("invalid header name '{name}': {e}")))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| VerifyError::Config(format!("invalid value for header '{name}': {e}")))?;
    Ok((header_name, header_value))
}
