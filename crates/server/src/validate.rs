//! Request parameter validation.
//!
//! The inbound event is untyped JSON shaped like an API gateway proxy event:
//!
//! ```json
//! { "queryStringParameters": { "scn": "1123456789", "creatorName": "Creator, Mock" } }
//! ```
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. event or `queryStringParameters` absent/null → [`ValidationError::MissingParameterContainer`]
//! 2. `scn` absent/null → [`ValidationError::MissingField`] naming `scn`
//! 3. `creatorName` absent/null → [`ValidationError::MissingField`] naming `creatorName`
//!
//! Values are not otherwise checked.

use serde_json::Value;
use thiserror::Error;

pub const QUERY_STRING_PARAMETERS_KEY: &str = "queryStringParameters";
pub const SCN_KEY: &str = "scn";
pub const CREATOR_NAME_KEY: &str = "creatorName";

/// A request missing something it needs. Always the caller's fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing event element 'queryStringParameters'.")]
    MissingParameterContainer,
    #[error("Mandatory parameter '{0}' is missing.")]
    MissingField(&'static str),
}

/// The two mandatory parameters, extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub scn: String,
    pub creator_name: String,
}

pub fn validate(event: Option<&Value>) -> Result<ValidRequest, ValidationError> {
    let parameters = event
        .and_then(|event| event.get(QUERY_STRING_PARAMETERS_KEY))
        .and_then(Value::as_object)
        .ok_or(ValidationError::MissingParameterContainer)?;

    let scn = parameter(parameters, SCN_KEY).ok_or(ValidationError::MissingField(SCN_KEY))?;
    let creator_name = parameter(parameters, CREATOR_NAME_KEY)
        .ok_or(ValidationError::MissingField(CREATOR_NAME_KEY))?;

    Ok(ValidRequest { scn, creator_name })
}

fn parameter(parameters: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match parameters.get(key)? {
        Value::Null => None,
        Value::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}
