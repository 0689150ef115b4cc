//! Action line parsing
//!
//! The model speaks plain text. A tool call is the first line whose trimmed
//! content starts with `Action:`, in the form `Action: <tool>: <input>`.
//! Anything else, including an action line with no tool separator, is a
//! final answer.

pub const ACTION_MARKER: &str = "Action:";

/// A parsed tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub tool_name: String,
    pub tool_input: String,
}

impl Action {
    pub fn new(tool_name: impl Into<String>, tool_input: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_input: tool_input.into(),
        }
    }
}

/// Extract the first action from model output, if any
pub fn parse_action(text: &str) -> Option<Action> {
    let line = text
        .lines()
        .map(str::trim_start)
        .find(|line| line.starts_with(ACTION_MARKER))?;

    let rest = line.strip_prefix(ACTION_MARKER)?;
    let Some((name, input)) = rest.split_once(':') else {
        tracing::debug!(line = %line, "Action line without tool separator, treating reply as final answer");
        return None;
    };

    Some(Action::new(name.trim(), input.trim()))
}
