use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::echoes::{EchoAuthor, EchoField};
use crate::event::{ActionPayload, AgentEvent, SouvenirData};
use crate::memory::MemoryBank;
use crate::prompt::DriftProfile;
use crate::state::CompanionState;
use crate::transcript::{Role, Transcript};
use crate::widgets::SlotBoard;

/// Presentation-side callbacks fired by the router.
///
/// Rendering is out of scope here; implementations update whatever UI
/// exists. Both hooks default to no-ops.
pub trait Presenter: Send + Sync {
    /// Liveness blip, fired once for every recognized agent action.
    fn activity_ping(&self) {}

    /// A souvenir arrived. No companion state changes; displaying the
    /// postcard is the presenter's business.
    fn souvenir(&self, _souvenir: &SouvenirData) {}
}

/// [`Presenter`] implementation that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPresenter;

impl Presenter for NoopPresenter {}

/// One client's view of the companion, rebuilt from stream frames.
///
/// Holds current values only, never an event log, so a client that
/// reconnects after a gap simply misses the intermediate updates and
/// converges on the next frame it sees.
pub struct CompanionClient {
    pub state: CompanionState,
    pub echoes: EchoField,
    pub transcript: Transcript,
    pub widgets: SlotBoard,
    pub memories: MemoryBank,
    pub profile: DriftProfile,
    presenter: Arc<dyn Presenter>,
}

impl CompanionClient {
    pub fn new(presenter: Arc<dyn Presenter>) -> Self {
        Self {
            state: CompanionState::default(),
            echoes: EchoField::default(),
            transcript: Transcript::default(),
            widgets: SlotBoard::default(),
            memories: MemoryBank::default(),
            profile: DriftProfile::default(),
            presenter,
        }
    }

    /// Decode one transport frame.
    ///
    /// Malformed frames and the `connected` marker are discarded without
    /// touching state; the stream loop must never die on bad input.
    pub fn handle_frame(&mut self, raw: &str) {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                debug!(%err, "dropping malformed frame");
                return;
            }
        };
        if value.get("type").and_then(Value::as_str) == Some("connected") {
            return;
        }
        let event: AgentEvent = match serde_json::from_value(value) {
            Ok(event) => event,
            Err(err) => {
                debug!(%err, "dropping undecodable frame");
                return;
            }
        };
        self.apply(&event);
    }

    /// Apply a decoded event to local state.
    pub fn apply(&mut self, event: &AgentEvent) {
        // The ping fires for every recognized action, whatever the
        // handler does with the payload.
        self.presenter.activity_ping();

        let payload = match ActionPayload::decode(event) {
            Ok(payload) => payload,
            Err(err) => {
                debug!(action = %event.action, %err, "dropping event with bad payload");
                return;
            }
        };

        match payload {
            ActionPayload::UpdateStatus(patch) => {
                if let Some(mood) = patch.mood {
                    self.state.set_mood(mood);
                }
                if let Some(health) = patch.health {
                    self.state.set_health(health);
                }
            }
            ActionPayload::PostEcho(echo) => {
                self.echoes.add(echo.text, EchoAuthor::Agent, echo.x, echo.y);
            }
            ActionPayload::PostChatMessage(line) => {
                self.transcript.append(Role::Agent, line.text);
            }
            ActionPayload::UpdateUiState(ui) => {
                self.widgets.insert(ui);
            }
            ActionPayload::DeliverSouvenir(souvenir) => self.presenter.souvenir(&souvenir),
        }
    }
}
