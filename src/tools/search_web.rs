//! Web search placeholder
//!
//! Returns canned results that echo the query; no network access.

use super::Tool;

pub struct SearchWebTool;

impl Tool for SearchWebTool {
    fn name(&self) -> &'static str {
        "search_web"
    }

    fn description(&self) -> &'static str {
        "Search the web for information about a topic and return a short list of results."
    }

    fn run(&self, input: &str) -> String {
        let query = input.trim();
        format!(
            "MOCK SEARCH RESULTS for '{query}': \
             1. An introduction to {query}. \
             2. Recent developments in {query}. \
             3. Frequently asked questions about {query}."
        )
    }
}
