//! Transport-level response envelope.
//!
//! Every outcome, success or failure, ends up as a [`GatewayResponse`]:
//! a status code, a small fixed header map, and a JSON body. Error bodies are
//! always exactly `{"error":"<message>"}`.

use std::collections::BTreeMap;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const CORS_ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl GatewayResponse {
    /// 200 response carrying `payload` serialized as JSON.
    pub fn success<T: Serialize>(payload: &T, cors_origin: Option<&str>) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self::with_body(StatusCode::OK.as_u16(), body, cors_origin),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response payload");
                Self::error(
                    StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    "Failed to serialize response.",
                    cors_origin,
                )
            }
        }
    }

    /// Response with body `{"error": message}` regardless of `status_code`.
    pub fn error(status_code: u16, message: &str, cors_origin: Option<&str>) -> Self {
        let body = json!({ "error": message }).to_string();
        Self::with_body(status_code, body, cors_origin)
    }

    fn with_body(status_code: u16, body: String, cors_origin: Option<&str>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE_HEADER.to_string(), APPLICATION_JSON.to_string());
        if let Some(origin) = cors_origin.filter(|origin| !origin.is_empty()) {
            headers.insert(CORS_ALLOW_ORIGIN_HEADER.to_string(), origin.to_string());
        }

        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => tracing::warn!(header = %name, "dropping header that is not valid HTTP"),
            }
        }

        response
    }
}
