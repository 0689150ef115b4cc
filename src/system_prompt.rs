//! System prompt construction for the `ReAct` protocol
//!
//! The prompt is a fixed instruction block followed by one bullet per
//! registered tool, in registry order. Streaming runs get an extra rule:
//! the model must stop after its Action line, because the Observation is
//! produced by the loop and a model that writes its own would
//! desynchronize the exchange.

use crate::tools::ToolRegistry;
use std::fmt::Write;

/// Base instructions establishing the `ReAct` cycle
const BASE_PROMPT: &str = r"You are a research assistant that answers questions with the ReAct (Reasoning and Acting) protocol.

Work through the question in this format:

Thought: your reasoning about what to do next
Action: tool_name: input
Observation: the result of the action
... (repeat Thought/Action/Observation as needed)
Answer: your final answer to the question

Write at most one Action per reply and put it on a single line. When you have enough information, reply with a Thought and an Answer and no Action.";

/// Extra rule for runs whose output is streamed token by token
const STREAMING_RULES: &str = r"

Only ever write Thought and Action lines, or a final Answer. Never write an Observation line yourself: after an Action, end your reply. The Observation is supplied to you in the next message once the tool has run.";

/// Which loop the prompt is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Blocking,
    Streaming,
}

/// Build the complete system prompt for a run.
pub fn build_system_prompt(tools: &ToolRegistry, mode: PromptMode) -> String {
    let mut prompt = String::from(BASE_PROMPT);

    if mode == PromptMode::Streaming {
        prompt.push_str(STREAMING_RULES);
    }

    prompt.push_str("\n\nAvailable tools:\n");
    for tool in tools.iter() {
        let _ = writeln!(prompt, "- {}: {}", tool.name(), tool.description());
    }

    prompt
}
