use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use companion::{AgentAction, AgentEvent, now_ms};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use crate::AppState;

/// Body of an ingestion request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    pub shared_secret: String,
    pub action: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Acknowledgment returned to the producing agent. The subscriber
/// count tells the producer whether anyone was listening.
#[derive(Debug, Serialize)]
pub struct IngestAck {
    pub ok: bool,
    pub action: AgentAction,
    pub timestamp: i64,
    pub subscribers: usize,
}

/// Failure modes of the ingestion endpoint. Nothing is published on
/// any of these paths.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Fail closed: without a configured secret, nothing gets in.
    #[error("server not configured: no shared secret set")]
    SecretUnset,
    #[error("unauthorized: shared secret mismatch")]
    Unauthorized,
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error(
        "unknown action {0:?}; valid actions: update_status, post_echo, \
         deliver_souvenir, update_ui_state, post_chat_message"
    )]
    UnknownAction(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::SecretUnset => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MalformedBody(_) | ApiError::UnknownAction(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `POST /agent/ingest` — the only path by which external events enter
/// the bus.
///
/// The event timestamp is assigned here, once, at publish time; the
/// producer never sets it.
pub async fn ingest(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<IngestAck>, ApiError> {
    // Without a configured secret nothing else matters, not even
    // whether the body parses.
    let secret = state
        .config
        .shared_secret
        .as_deref()
        .ok_or(ApiError::SecretUnset)?;

    // Decoded by hand so every malformed body maps to 400.
    let req: IngestRequest =
        serde_json::from_value(body).map_err(|err| ApiError::MalformedBody(err.to_string()))?;

    if req.shared_secret != secret {
        warn!("ingestion rejected: shared secret mismatch");
        return Err(ApiError::Unauthorized);
    }

    let action: AgentAction = req
        .action
        .parse()
        .map_err(|_| ApiError::UnknownAction(req.action.clone()))?;

    let timestamp = now_ms();
    state.bus.publish(AgentEvent {
        action,
        data: req.data,
        timestamp,
    });
    let subscribers = state.bus.subscriber_count();
    info!(action = %action, subscribers, "agent event published");

    Ok(Json(IngestAck {
        ok: true,
        action,
        timestamp,
        subscribers,
    }))
}
