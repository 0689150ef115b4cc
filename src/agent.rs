//! `ReAct` agent
//!
//! Alternates model turns with local tool calls until the model answers or
//! the iteration budget runs out. Two loops share the parser, conversation
//! log and state transition: [`ReactAgent::run`] blocks per model call and
//! returns a transcript, [`ReactAgent::run_streaming`] emits [`AgentEvent`]s
//! over a channel as tokens arrive.

mod conversation;
mod event;
mod parser;
mod runner;
mod state;
mod streaming;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub mod testing;

pub use event::AgentEvent;
pub use runner::{ReactAgent, RunOutcome};
pub use state::ExitReason;
pub use streaming::event_channel;

use crate::llm::LlmError;
use crate::tools::ToolError;
use std::time::Duration;
use thiserror::Error;

/// Default iteration budget
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Default cap on tokens generated per model call
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Errors that end an exchange early
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The event consumer went away mid-run
    #[error("Event receiver dropped before the run finished")]
    EventChannelClosed,
}

/// Per-agent loop settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSettings {
    /// Model rounds allowed per exchange
    pub max_iterations: usize,
    /// Output cap on every model call; always set, streaming requires it
    pub max_tokens: u32,
    /// Per-call timeout handed to the model gateway
    pub timeout: Option<Duration>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: None,
        }
    }
}
