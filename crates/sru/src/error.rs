//! Failure types for the SRU collaborators.
//!
//! | Error | Stage | Meaning |
//! |-------|-------|---------|
//! | [`FetchError`] | transport | the endpoint could not be reached or did not answer 2xx |
//! | [`ExtractionError`] | parsing | the response had no usable record |
//!
//! Messages are short and never include the response body or request URL.

use thiserror::Error;

/// Failure reaching or reading from the SRU endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("http client setup failed: {0}")]
    Client(String),
    /// No response within the configured timeout.
    #[error("request to SRU endpoint timed out")]
    Timeout,
    /// Connection, protocol, or body read failure.
    #[error("request to SRU endpoint failed: {0}")]
    Request(String),
    /// The endpoint answered with a non-success status.
    #[error("SRU endpoint returned HTTP {0}")]
    Status(u16),
}

/// Failure turning a raw SRU response into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The search matched zero records.
    #[error("no record found")]
    NotFound,
    /// The payload is not a readable SRU/MARCXML response.
    #[error("malformed SRU payload: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout;
        }
        if let Some(status) = err.status() {
            return FetchError::Status(status.as_u16());
        }
        FetchError::Request(err.without_url().to_string())
    }
}

impl From<quick_xml::Error> for ExtractionError {
    fn from(err: quick_xml::Error) -> Self {
        ExtractionError::MalformedPayload(err.to_string())
    }
}
