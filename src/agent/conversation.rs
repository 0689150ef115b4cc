//! Conversation state threaded through a single exchange

use crate::llm::{LlmRequest, Message};

/// Prefix of the observation line sent back to the model
pub const OBSERVATION_PREFIX: &str = "Observation:";

/// Format a tool result as an observation line
pub fn format_observation(result: &str) -> String {
    format!("{OBSERVATION_PREFIX} {result}")
}

/// Ordered message log for one exchange.
///
/// Always starts with the system prompt and the user query; every tool round
/// then appends the assistant reply and the observation as a user message.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt), Message::user(query)],
        }
    }

    /// Record one completed tool round
    pub fn record_step(&mut self, assistant_text: impl Into<String>, observation: impl Into<String>) {
        self.messages.push(Message::assistant(assistant_text));
        self.messages.push(Message::user(observation));
    }

    /// Number of completed tool rounds
    pub fn steps(&self) -> usize {
        (self.messages.len() - 2) / 2
    }

    /// Build the request for the next model call
    pub fn request(&self, max_tokens: u32, timeout: Option<std::time::Duration>) -> LlmRequest {
        let request = LlmRequest::new(self.messages.clone()).with_max_tokens(max_tokens);
        match timeout {
            Some(timeout) => request.with_timeout(timeout),
            None => request,
        }
    }
}
