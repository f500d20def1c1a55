//! Client-side core of the lux companion.
//!
//! This crate owns everything a viewing client needs to reconstruct the
//! companion's visible state from the relay's event stream: the wire
//! event model, the deterministic state machine for vitals and travel,
//! the bounded echo/transcript/widget collections, the frame router,
//! and the chat-turn protocol against the completion collaborator.
//!
//! It deliberately knows nothing about rendering; presentation hangs
//! off the [`Presenter`] seam.

pub mod echoes;
pub mod event;
pub mod memory;
pub mod prompt;
pub mod router;
pub mod state;
pub mod transcript;
pub mod turn;
pub mod widgets;

pub use echoes::{Echo, EchoAuthor, EchoField, Viewport};
pub use event::{
    ActionPayload, AgentAction, AgentEvent, ChatLine, DecodeError, EchoPayload, SouvenirData,
    StatusPatch, UiPayload, UiType, UnknownAction,
};
pub use memory::{Memory, MemoryBank};
pub use prompt::{DriftProfile, build_system_prompt};
pub use router::{CompanionClient, NoopPresenter, Presenter};
pub use state::{CompanionState, LEVEL_STEP, Mood, Travel, TrustPolicy};
pub use transcript::{MAX_ENTRIES, Role, Transcript, TranscriptEntry};
pub use turn::Completion;
pub use widgets::{MAX_SLOTS, SlotBoard, WidgetSlot};

/// Current wall-clock time in milliseconds, the timestamp unit used on
/// the wire.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
