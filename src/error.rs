//! Error taxonomy for verification runs.
//!
//! Every fallible operation in the crate returns [`VerifyError`]. The variants
//! map onto the four outcomes a scenario can end in:
//!
//! - [`VerifyError::Transport`] - the request never produced a response
//!   (connection refused, DNS failure, timeout)
//! - [`VerifyError::Decode`] - the response body is not valid JSON or does not
//!   fit the model it is decoded into
//! - [`VerifyError::SchemaLoad`] - a schema resource is missing or invalid;
//!   fatal for the whole suite
//! - [`VerifyError::Assertion`] - the API answered, but not with what was
//!   expected
//!
//! None of these are retried anywhere in the crate.

use crate::assertion::AssertionFailure;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = VerifyError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// The HTTP exchange failed below the status-code level.
    #[error("transport error on {method} {uri}: {source}")]
    Transport {
        method: String,
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response body could not be decoded into the requested model.
    #[error("failed to decode response body as {target}: {source}")]
    Decode {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A request payload could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A schema document could not be found, parsed or compiled.
    #[error("failed to load schema '{name}': {reason}")]
    SchemaLoad { name: String, reason: String },

    /// An expectation about the response was not met.
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// Process-wide configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl VerifyError {
    /// Fatal errors abort the whole suite instead of a single scenario.
    pub fn is_fatal(&self) -> bool {
        matches!(self, VerifyError::SchemaLoad { .. } | VerifyError::Config(_))
    }

    /// Short name of the taxonomy entry, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyError::Transport { .. } => "TransportError",
            VerifyError::Decode { .. } => "DecodeError",
            VerifyError::Encode(_) => "EncodeError",
            VerifyError::SchemaLoad { .. } => "SchemaLoadError",
            VerifyError::Assertion(_) => "AssertionFailure",
            VerifyError::Config(_) => "ConfigError",
        }
    }

    pub(crate) fn schema_load(name: impl Into<String>, reason: impl ToString) -> Self {
        VerifyError::SchemaLoad {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
