//! API route handlers
//!
//! - `health`: Liveness and readiness probes
//! - `record`: Alma record lookup, via query string or raw gateway event

pub mod health;
pub mod record;

use crate::error::ServerError;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use crate::envelope::GatewayResponse;

/// API version and base info
///
/// Returns service information and available endpoints (GET /).
///
/// # Response
///
/// ```json
/// {
///   "name": "Alma Record Server",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "Alma Record Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/alma",
            "/invoke",
            "/health",
            "/ready"
        ]
    }))
}

/// 404 Not Found handler
///
/// Undefined routes get the same `{"error": ...}` envelope as lookup failures.
pub async fn not_found(State(state): State<Arc<ServerState>>) -> GatewayResponse {
    ServerError::NotFound.into_gateway_response(state.cors_origin())
}
