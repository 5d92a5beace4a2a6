use super::ApiResponse;
use crate::assertion::AssertionFailure;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A reusable, named set of expectations every matching response must meet.
///
/// Checks run in a fixed order (status, content type, empty body) and stop at
/// the first failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    status: u16,
    content_type: Option<String>,
    empty_body: bool,
}

impl ResponseSpec {
    /// Expect `status` and nothing else.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            empty_body: false,
        }
    }

    /// `200 OK` with a JSON body.
    pub fn ok() -> Self {
        Self::status(200).with_content_type(JSON_CONTENT_TYPE)
    }

    /// `201 Created` with a JSON body.
    pub fn created() -> Self {
        Self::status(201).with_content_type(JSON_CONTENT_TYPE)
    }

    /// `404 Not Found` with nothing in the body.
    pub fn not_found() -> Self {
        Self::status(404).with_empty_body()
    }

    /// Require the media type of `Content-Type`; parameters such as
    /// `charset` are ignored and the comparison is case-insensitive.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Require a blank body or `{}`.
    pub fn with_empty_body(mut self) -> Self {
        self.empty_body = true;
        self
    }

    pub fn expected_status(&self) -> u16 {
        self.status
    }

    pub fn verify(&self, response: &ApiResponse) -> Result<(), AssertionFailure> {
        if response.status() != self.status {
            return Err(AssertionFailure::new(
                "status",
                self.status.to_string(),
                response.status().to_string(),
            ));
        }

        if let Some(expected) = &self.content_type {
            let actual = response.content_type().unwrap_or("<none>");
            let media_type = actual.split(';').next().unwrap_or_default().trim();
            if !media_type.eq_ignore_ascii_case(expected) {
                return Err(AssertionFailure::new(
                    "header:content-type",
                    expected.clone(),
                    actual,
                ));
            }
        }

        if self.empty_body && !response.is_body_empty() {
            return Err(AssertionFailure::new(
                "body",
                "an empty body",
                response.body(),
            ));
        }

        Ok(())
    }
}
