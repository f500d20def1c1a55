use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::state::Mood;

/// Verbs an external agent may perform against the companion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentAction {
    UpdateStatus,
    PostEcho,
    DeliverSouvenir,
    UpdateUiState,
    PostChatMessage,
}

impl AgentAction {
    /// Every action the ingestion endpoint accepts.
    pub const ALL: [AgentAction; 5] = [
        AgentAction::UpdateStatus,
        AgentAction::PostEcho,
        AgentAction::DeliverSouvenir,
        AgentAction::UpdateUiState,
        AgentAction::PostChatMessage,
    ];

    /// Wire name of the action.
    pub fn name(self) -> &'static str {
        match self {
            AgentAction::UpdateStatus => "update_status",
            AgentAction::PostEcho => "post_echo",
            AgentAction::DeliverSouvenir => "deliver_souvenir",
            AgentAction::UpdateUiState => "update_ui_state",
            AgentAction::PostChatMessage => "post_chat_message",
        }
    }
}

impl fmt::Display for AgentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for action strings outside the accepted vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for AgentAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.name() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// The unit of communication between the agent and viewing clients.
///
/// `timestamp` is assigned exactly once, by the ingestion endpoint at
/// publish time; producers never set it, so the order subscribers
/// observe reflects arrival at the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEvent {
    pub action: AgentAction,
    #[serde(default)]
    pub data: Map<String, Value>,
    pub timestamp: i64,
}

/// Partial vitals update. Absent fields are no-ops, not resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusPatch {
    pub mood: Option<Mood>,
    pub health: Option<i64>,
}

/// Text fragment the agent pins to the canvas; coordinates are
/// optional and picked client-side when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoPayload {
    pub text: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// One agent-authored chat line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLine {
    pub text: String,
}

/// Kinds of generative UI cards the agent can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiType {
    ScheduleCard,
    ApprovalCard,
    WeatherVibe,
    TextMessage,
    ChartCard,
    DataTable,
    NewsSummary,
}

/// A generated UI descriptor. `data` stays loose on purpose; the
/// renderer owns its interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPayload {
    pub ui_type: UiType,
    pub mood: Mood,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Postcard the agent sends home while traveling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SouvenirData {
    pub message: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub scene: Option<String>,
}

/// Failure to interpret an event's `data` map as its action's payload.
#[derive(Debug, thiserror::Error)]
#[error("malformed {action} payload: {source}")]
pub struct DecodeError {
    pub action: AgentAction,
    #[source]
    pub source: serde_json::Error,
}

/// Typed payload of an [`AgentEvent`], discriminated by its action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPayload {
    UpdateStatus(StatusPatch),
    PostEcho(EchoPayload),
    DeliverSouvenir(SouvenirData),
    UpdateUiState(UiPayload),
    PostChatMessage(ChatLine),
}

impl ActionPayload {
    /// Decode the loose `data` map into the action's typed payload.
    pub fn decode(event: &AgentEvent) -> Result<Self, DecodeError> {
        let data = Value::Object(event.data.clone());
        let action = event.action;
        let wrap = |source| DecodeError { action, source };
        Ok(match action {
            AgentAction::UpdateStatus => {
                ActionPayload::UpdateStatus(serde_json::from_value(data).map_err(wrap)?)
            }
            AgentAction::PostEcho => {
                ActionPayload::PostEcho(serde_json::from_value(data).map_err(wrap)?)
            }
            AgentAction::DeliverSouvenir => {
                ActionPayload::DeliverSouvenir(serde_json::from_value(data).map_err(wrap)?)
            }
            AgentAction::UpdateUiState => {
                ActionPayload::UpdateUiState(serde_json::from_value(data).map_err(wrap)?)
            }
            AgentAction::PostChatMessage => {
                ActionPayload::PostChatMessage(serde_json::from_value(data).map_err(wrap)?)
            }
        })
    }
}
