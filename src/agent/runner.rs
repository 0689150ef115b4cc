//! Blocking `ReAct` loop

use super::conversation::{format_observation, Conversation};
use super::parser::{parse_action, Action};
use super::state::{ExitReason, LoopState, Step};
use super::{AgentError, AgentSettings};
use crate::llm::LlmService;
use crate::system_prompt::{build_system_prompt, PromptMode};
use crate::tools::ToolRegistry;
use std::sync::Arc;

/// Result of one finished exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Every round concatenated, trailing whitespace trimmed. Empty for
    /// streaming runs, whose output went out as events.
    pub transcript: String,
    pub exit: ExitReason,
    /// Model calls made
    pub iterations: usize,
    /// Tools dispatched
    pub tool_calls: usize,
}

/// `ReAct` agent bound to one model gateway and one tool registry.
///
/// Cheap to clone; each call to [`run`](Self::run) or
/// [`run_streaming`](Self::run_streaming) owns a fresh conversation.
#[derive(Clone)]
pub struct ReactAgent {
    pub(super) llm: Arc<dyn LlmService>,
    pub(super) tools: Arc<ToolRegistry>,
    pub(super) settings: AgentSettings,
}

impl ReactAgent {
    pub fn new(llm: Arc<dyn LlmService>, tools: ToolRegistry, settings: AgentSettings) -> Self {
        Self {
            llm,
            tools: Arc::new(tools),
            settings,
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn settings(&self) -> AgentSettings {
        self.settings
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }

    /// Run one exchange to completion and return its transcript
    pub async fn run(&self, query: &str) -> Result<RunOutcome, AgentError> {
        let max_iterations = self.settings.max_iterations;
        let system_prompt = build_system_prompt(&self.tools, PromptMode::Blocking);
        let mut conversation = Conversation::new(system_prompt, query);
        let mut transcript = format!("User: {query}\n\n");
        let mut state = LoopState::start(max_iterations);
        let mut iterations = 0;

        tracing::info!(max_iterations, model = %self.model_id(), "Starting ReAct run");

        while let LoopState::Running { iteration } = state {
            let request = conversation.request(self.settings.max_tokens, self.settings.timeout);
            let response = self.llm.complete(&request).await?;
            iterations += 1;

            transcript.push_str(&response.text);
            transcript.push('\n');

            let step = match parse_action(&response.text) {
                Some(action) => {
                    let observation = self.dispatch(&action, iteration)?;
                    transcript.push_str(&observation);
                    transcript.push_str("\n\n");
                    conversation.record_step(response.text, observation);
                    Step::Observed
                }
                None => Step::Answered,
            };
            state = state.advance(step, max_iterations);
        }

        let outcome = RunOutcome {
            transcript: transcript.trim_end().to_string(),
            exit: finished(state),
            iterations,
            tool_calls: conversation.steps(),
        };
        log_outcome(&outcome);
        Ok(outcome)
    }

    /// Execute the requested tool and format its observation
    pub(super) fn dispatch(&self, action: &Action, iteration: usize) -> Result<String, AgentError> {
        let result = self
            .tools
            .execute(&action.tool_name, &action.tool_input)
            .inspect_err(|e| {
                tracing::warn!(iteration, tool = %action.tool_name, error = %e, "Tool dispatch failed");
            })?;

        tracing::debug!(
            iteration,
            tool = %action.tool_name,
            input_len = action.tool_input.len(),
            output_len = result.len(),
            "Tool executed"
        );
        Ok(format_observation(&result))
    }
}

/// Exit reason of a state the loop has left
pub(super) fn finished(state: LoopState) -> ExitReason {
    // Loops only exit on a terminal state
    state.exit_reason().unwrap_or(ExitReason::BudgetExhausted)
}

pub(super) fn log_outcome(outcome: &RunOutcome) {
    match outcome.exit {
        ExitReason::Answered => tracing::info!(
            iterations = outcome.iterations,
            tool_calls = outcome.tool_calls,
            "ReAct run answered"
        ),
        ExitReason::BudgetExhausted => tracing::info!(
            iterations = outcome.iterations,
            tool_calls = outcome.tool_calls,
            "ReAct run exhausted its iteration budget"
        ),
    }
}
