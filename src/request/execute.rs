use super::RequestContext;
use crate::error::{Result, VerifyError};
use crate::response::ApiResponse;
use http::header::CONTENT_TYPE;
use http::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Payload of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized with `serde_json` before sending
    Json(Value),
    /// Sent verbatim
    Raw(String),
}

impl RequestBody {
    /// Serialize any model into a JSON body.
    pub fn json<T: Serialize>(model: &T) -> Result<Self> {
        serde_json::to_value(model)
            .map(RequestBody::Json)
            .map_err(VerifyError::Encode)
    }

    fn into_text(self) -> Result<String> {
        match self {
            RequestBody::Json(value) => serde_json::to_string(&value).map_err(VerifyError::Encode),
            RequestBody::Raw(text) => Ok(text),
        }
    }
}

/// Send one request and collect the complete response.
///
/// Every status code is returned as a response; only failures below HTTP
/// (connect, DNS, timeout, broken body stream) become
/// [`VerifyError::Transport`]. Nothing is retried.
pub fn execute(
    ctx: &RequestContext,
    method: Method,
    path: &str,
    body: Option<RequestBody>,
) -> Result<ApiResponse> {
    let uri = ctx.uri_for(path);
    info!(method = %method, uri = %uri, "Sending request");

    let transport = |source: reqwest::Error| VerifyError::Transport {
        method: method.to_string(),
        uri: uri.clone(),
        source,
    };

    let mut builder = ctx
        .client()
        .request(method.clone(), &uri)
        .headers(ctx.headers().clone());

    if let Some(body) = body {
        let text = body.into_text()?;
        debug!(uri = %uri, body = %text, "Request body");
        builder = builder.header(CONTENT_TYPE, ctx.content_type()).body(text);
    }

    let response = builder.send().map_err(transport)?;
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let text = response.text().map_err(transport)?;

    info!(method = %method, uri = %uri, status = status, "Received response");
    debug!(uri = %uri, status = status, body = %text, "Response body");

    Ok(ApiResponse::new(uri, status, headers, text))
}

impl RequestContext {
    pub fn get(&self, path: &str) -> Result<ApiResponse> {
        execute(self, Method::GET, path, None)
    }

    pub fn post(&self, path: &str, body: RequestBody) -> Result<ApiResponse> {
        execute(self, Method::POST, path, Some(body))
    }
}
