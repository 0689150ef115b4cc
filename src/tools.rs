//! Tools the research assistant can invoke
//!
//! Tools are stateless capability records: a name, a one-sentence
//! description that is interpolated into the system prompt, and a pure
//! string-to-string function.

mod save_note;
mod search_web;

pub use save_note::SaveNoteTool;
pub use search_web::SearchWebTool;

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Trait for tools that can be executed by the agent
pub trait Tool: Send + Sync {
    /// Tool name, unique within a registry
    fn name(&self) -> &str;

    /// Single-sentence capability summary for the system prompt
    fn description(&self) -> &str;

    /// Execute the tool. The result is returned to the model verbatim.
    fn run(&self, input: &str) -> String;
}

/// Errors raised by tool dispatch
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Wraps any pure string function as a [`Tool`]
#[cfg(test)]
pub struct FnTool<F> {
    name: String,
    description: String,
    function: F,
}

#[cfg(test)]
impl<F> FnTool<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    pub fn new(name: impl Into<String>, description: impl Into<String>, function: F) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            function,
        }
    }
}

#[cfg(test)]
impl<F> Tool for FnTool<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self, input: &str) -> String {
        (self.function)(input)
    }
}

/// Ordered collection of tools available to the agent
///
/// Insertion order is preserved; it is the order tools are listed in the
/// system prompt.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create the standard registry: web search, then note saving
    pub fn standard() -> Self {
        let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(SearchWebTool), Arc::new(SaveNoteTool)];
        Self::new(tools)
    }

    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    /// Registered tools in registry order
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Tool + 'static)> + '_ {
        self.tools.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by exact name; the first match wins
    pub fn execute(&self, name: &str, input: &str) -> Result<String, ToolError> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.run(input))
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(Tool::name)).finish()
    }
}
