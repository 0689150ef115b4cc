//! Conversation view state

use crate::agent::{AgentEvent, ExitReason, RunOutcome};

/// One block in the conversation pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Query(String),
    /// Model output, grown token by token
    Response(String),
    Observation { tool: String, content: String },
    Error(String),
    Notice(String),
}

/// Everything the renderer needs
#[derive(Debug, Default)]
pub struct ChatState {
    pub entries: Vec<Entry>,
    pub input: String,
    /// A query is in flight
    pub running: bool,
    /// Top line of the conversation pane; `None` follows the newest output
    pub scroll: Option<u16>,
    /// Largest useful scroll offset, refreshed on every draw
    pub max_scroll: u16,
    pub status: String,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            status: "Ready".to_string(),
            ..Self::default()
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Take the input as a new query. Returns `None` while a query is
    /// running or when the input is blank.
    pub fn submit(&mut self) -> Option<String> {
        if self.running {
            return None;
        }
        let query = self.input.trim().to_string();
        if query.is_empty() {
            return None;
        }

        self.input.clear();
        self.entries.push(Entry::Query(query.clone()));
        self.running = true;
        self.status = "Thinking...".to_string();
        self.scroll = None;
        Some(query)
    }

    pub fn apply_event(&mut self, event: AgentEvent) {
        self.status = format!("Thinking... (step {})", event.iteration());
        match event {
            AgentEvent::Token { content, .. } => self.append_token(&content),
            AgentEvent::Observation { content, tool, .. } => {
                self.entries.push(Entry::Observation { tool, content });
            }
            other => tracing::debug!(kind = other.kind(), "Ignoring event"),
        }
    }

    /// Append streamed text to the current response, opening one if needed
    pub fn append_token(&mut self, token: &str) {
        if let Some(Entry::Response(text)) = self.entries.last_mut() {
            text.push_str(token);
        } else {
            self.entries.push(Entry::Response(token.to_string()));
        }
    }

    pub fn finish(&mut self, result: Result<RunOutcome, String>) {
        self.running = false;
        match result {
            Ok(outcome) => {
                if outcome.exit == ExitReason::BudgetExhausted {
                    self.entries.push(Entry::Notice(format!(
                        "Stopped after {} iterations without a final answer.",
                        outcome.iterations
                    )));
                }
                self.status = format!(
                    "Done: {} model calls, {} tool calls",
                    outcome.iterations, outcome.tool_calls
                );
            }
            Err(message) => {
                self.entries.push(Entry::Error(message));
                self.status = "Failed".to_string();
            }
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let current = self.scroll.unwrap_or(self.max_scroll);
        self.scroll = Some(current.saturating_sub(lines));
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let Some(current) = self.scroll else {
            return;
        };
        let next = current.saturating_add(lines);
        self.scroll = (next < self.max_scroll).then_some(next);
    }
}
