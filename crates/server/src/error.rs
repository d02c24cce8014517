use alma_record::{ExtractionError, FetchError, LookupError};
use axum::http::StatusCode;

use crate::envelope::GatewayResponse;
use crate::validate::ValidationError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,

    #[error("Request timed out")]
    Timeout,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            // Zero hits stays a 500 alongside malformed payloads.
            ServerError::Fetch(_)
            | ServerError::Extraction(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the caller.
    ///
    /// Client errors echo what was wrong with the request. Downstream failures
    /// get a short fixed description; the detail goes to the log only.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::Validation(err) => err.to_string(),
            ServerError::BadRequest(reason) => reason.clone(),
            ServerError::Fetch(FetchError::Timeout) => {
                "Timed out waiting for the Alma SRU service.".to_string()
            }
            ServerError::Fetch(_) => "Failed to retrieve record from the Alma SRU service.".to_string(),
            ServerError::Extraction(ExtractionError::NotFound) => {
                "No matching record found in Alma.".to_string()
            }
            ServerError::Extraction(ExtractionError::MalformedPayload(_)) => {
                "Could not read the record returned by Alma.".to_string()
            }
            ServerError::Internal(_) | ServerError::Config(_) => "Internal server error.".to_string(),
            ServerError::NotFound => "Not found.".to_string(),
            ServerError::Timeout => "Request timed out.".to_string(),
        }
    }

    /// Terminal envelope for this error.
    pub fn into_gateway_response(self, cors_origin: Option<&str>) -> GatewayResponse {
        GatewayResponse::error(self.status_code().as_u16(), &self.public_message(), cors_origin)
    }
}

impl From<LookupError> for ServerError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Fetch(err) => ServerError::Fetch(err),
            LookupError::Extract(err) => ServerError::Extraction(err),
        }
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}
