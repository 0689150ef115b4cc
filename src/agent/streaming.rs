//! Streaming `ReAct` loop
//!
//! Same control flow as the blocking loop, but every model fragment is
//! forwarded as a [`AgentEvent::Token`] the moment it arrives. Events go over
//! a bounded channel and each send is awaited, so the loop never runs ahead
//! of its consumer.

use super::conversation::Conversation;
use super::event::AgentEvent;
use super::parser::parse_action;
use super::runner::{finished, log_outcome, ReactAgent, RunOutcome};
use super::state::{LoopState, Step};
use super::AgentError;
use crate::system_prompt::{build_system_prompt, PromptMode};
use futures::StreamExt;
use tokio::sync::mpsc;

/// Capacity for event channels feeding a consumer one event at a time
pub const EVENT_CHANNEL_CAPACITY: usize = 1;

/// Create a channel sized for [`ReactAgent::run_streaming`]
pub fn event_channel() -> (mpsc::Sender<AgentEvent>, mpsc::Receiver<AgentEvent>) {
    mpsc::channel(EVENT_CHANNEL_CAPACITY)
}

impl ReactAgent {
    /// Run one exchange, emitting events on `events` as output arrives.
    ///
    /// The returned outcome has an empty transcript: the output already went
    /// out as events. Dropping the receiver ends the run with
    /// [`AgentError::EventChannelClosed`].
    pub async fn run_streaming(
        &self,
        query: &str,
        events: mpsc::Sender<AgentEvent>,
    ) -> Result<RunOutcome, AgentError> {
        let max_iterations = self.settings.max_iterations;
        let system_prompt = build_system_prompt(&self.tools, PromptMode::Streaming);
        let mut conversation = Conversation::new(system_prompt, query);
        let mut state = LoopState::start(max_iterations);
        let mut iterations = 0;

        tracing::info!(max_iterations, model = %self.model_id(), "Starting streaming ReAct run");

        while let LoopState::Running { iteration } = state {
            let request = conversation.request(self.settings.max_tokens, self.settings.timeout);
            let mut tokens = self.llm.stream(&request).await?;
            iterations += 1;

            let mut text = String::new();
            while let Some(fragment) = tokens.next().await {
                let fragment = fragment?;
                text.push_str(&fragment);
                emit(&events, AgentEvent::token(fragment, iteration)).await?;
            }

            let step = match parse_action(&text) {
                Some(action) => {
                    emit(&events, AgentEvent::token("\n", iteration)).await?;
                    let observation = self.dispatch(&action, iteration)?;
                    emit(
                        &events,
                        AgentEvent::observation(observation.clone(), iteration, &action.tool_name),
                    )
                    .await?;
                    conversation.record_step(text, observation);
                    Step::Observed
                }
                None => Step::Answered,
            };
            state = state.advance(step, max_iterations);
        }

        let outcome = RunOutcome {
            transcript: String::new(),
            exit: finished(state),
            iterations,
            tool_calls: conversation.steps(),
        };
        log_outcome(&outcome);
        Ok(outcome)
    }
}

async fn emit(events: &mpsc::Sender<AgentEvent>, event: AgentEvent) -> Result<(), AgentError> {
    events.send(event).await.map_err(|_| {
        tracing::debug!("Event receiver dropped, ending run");
        AgentError::EventChannelClosed
    })
}
