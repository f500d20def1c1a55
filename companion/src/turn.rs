use async_trait::async_trait;

use crate::event::UiPayload;
use crate::prompt::build_system_prompt;
use crate::router::CompanionClient;
use crate::transcript::Role;

/// Completion collaborator producing the structured chat reply.
///
/// The real backend lives outside this crate; tests script it.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, system_prompt: &str, message: &str) -> anyhow::Result<UiPayload>;
}

impl CompanionClient {
    /// Run one chat turn against the completion collaborator.
    ///
    /// The user's line lands in the transcript before the collaborator
    /// is consulted, and the reply's mood is applied as soon as it
    /// returns. The generated widget is deliberately *not* inserted
    /// here: it arrives later, asynchronously, over the event stream,
    /// so the agent can take its time producing rich output without
    /// blocking the turn.
    pub async fn take_turn(
        &mut self,
        chatter: &dyn Completion,
        message: &str,
    ) -> anyhow::Result<UiPayload> {
        self.transcript.append(Role::User, message);
        let prompt = build_system_prompt(&self.profile);
        let reply = chatter.complete(&prompt, message).await?;
        self.state.set_mood(reply.mood);
        Ok(reply)
    }
}
