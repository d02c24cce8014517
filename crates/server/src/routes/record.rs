use crate::envelope::GatewayResponse;
use crate::error::ServerError;
use crate::state::ServerState;
use crate::validate::QUERY_STRING_PARAMETERS_KEY;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Look up a record from query string parameters.
///
/// `GET /alma?scn=1123456789&creatorName=Creator,%20Mock`
///
/// The query string is wrapped into a gateway event; a request with no
/// parameters at all carries a null `queryStringParameters`, the same as an
/// API gateway would send. The envelope becomes the HTTP response directly.
pub async fn get_record(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<HashMap<String, String>>,
) -> GatewayResponse {
    let event = query_event(params);
    state.handler.handle_request(Some(&event), None).await
}

/// Look up a record from a raw gateway event.
///
/// `POST /invoke` with a JSON event body (or no body). Always answers HTTP 200
/// with the envelope itself as JSON, like a function invocation.
pub async fn invoke(State(state): State<Arc<ServerState>>, body: Bytes) -> Json<GatewayResponse> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Json(state.handler.handle_request(None, None).await);
    }

    match serde_json::from_slice::<Value>(&body) {
        Ok(event) => Json(state.handler.handle_request(Some(&event), None).await),
        Err(err) => {
            tracing::warn!(error = %err, "invoke body is not JSON");
            Json(ServerError::from(err).into_gateway_response(state.cors_origin()))
        }
    }
}

fn query_event(params: HashMap<String, String>) -> Value {
    if params.is_empty() {
        return json!({ QUERY_STRING_PARAMETERS_KEY: null });
    }

    let params: Map<String, Value> = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    json!({ QUERY_STRING_PARAMETERS_KEY: params })
}
