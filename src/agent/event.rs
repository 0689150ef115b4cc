//! Events emitted by the streaming loop

/// Unit of streaming output for one exchange
///
/// `iteration` is the 1-based round that produced the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// Incremental model output, in arrival order
    Token { content: String, iteration: usize },

    /// Formatted tool result (`Observation: ...`)
    Observation {
        content: String,
        iteration: usize,
        tool: String,
    },

    /// Reserved structural kinds, not emitted by the current loop
    #[allow(dead_code)]
    Thought { content: String, iteration: usize },
    #[allow(dead_code)]
    Action {
        tool: String,
        input: String,
        iteration: usize,
    },
    #[allow(dead_code)]
    Answer { content: String, iteration: usize },
}

impl AgentEvent {
    pub fn token(content: impl Into<String>, iteration: usize) -> Self {
        AgentEvent::Token {
            content: content.into(),
            iteration,
        }
    }

    pub fn observation(
        content: impl Into<String>,
        iteration: usize,
        tool: impl Into<String>,
    ) -> Self {
        AgentEvent::Observation {
            content: content.into(),
            iteration,
            tool: tool.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AgentEvent::Token { .. } => "token",
            AgentEvent::Observation { .. } => "observation",
            AgentEvent::Thought { .. } => "thought",
            AgentEvent::Action { .. } => "action",
            AgentEvent::Answer { .. } => "answer",
        }
    }

    pub fn iteration(&self) -> usize {
        match self {
            AgentEvent::Token { iteration, .. }
            | AgentEvent::Observation { iteration, .. }
            | AgentEvent::Thought { iteration, .. }
            | AgentEvent::Action { iteration, .. }
            | AgentEvent::Answer { iteration, .. } => *iteration,
        }
    }
}
