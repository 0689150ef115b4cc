//! Property-based tests for the `ReAct` loop
//!
//! Parser and termination invariants checked over generated inputs.

use super::parser::{parse_action, Action, ACTION_MARKER};
use super::testing::MockLlmService;
use super::*;
use crate::tools::ToolRegistry;
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Generators
// ============================================================================

/// Lines that never start with the action marker once trimmed
fn arb_plain_line() -> impl Strategy<Value = String> {
    "[ \t]{0,3}[A-Za-z0-9 :|.,!?]{0,40}"
        .prop_filter("must not be an action line", |line| {
            !line.trim_start().starts_with(ACTION_MARKER)
        })
}

fn arb_tool_name() -> impl Strategy<Value = String> {
    "[a-z_]{1,16}"
}

fn arb_tool_input() -> impl Strategy<Value = String> {
    "[A-Za-z0-9|.,!?]([A-Za-z0-9 :|.,!?]{0,30}[A-Za-z0-9|.,!?])?"
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Text with no action line never parses as an action
    #[test]
    fn prop_no_marker_means_no_action(lines in proptest::collection::vec(arb_plain_line(), 0..8)) {
        let text = lines.join("\n");
        prop_assert_eq!(parse_action(&text), None);
    }

    /// A well-formed action line round-trips name and input, whatever precedes it
    #[test]
    fn prop_action_line_is_found(
        before in proptest::collection::vec(arb_plain_line(), 0..4),
        after in proptest::collection::vec("[A-Za-z ]{0,20}", 0..3),
        name in arb_tool_name(),
        input in arb_tool_input(),
    ) {
        let mut lines = before;
        lines.push(format!("Action: {name}: {input}"));
        lines.extend(after);

        let action = parse_action(&lines.join("\n"));
        prop_assert_eq!(action, Some(Action::new(name, input)));
    }

    /// An action line without a separator is always a final answer
    #[test]
    fn prop_missing_separator_is_answer(word in "[A-Za-z_ ]{0,20}") {
        prop_assert_eq!(parse_action(&format!("Action:{word}")), None);
    }

    /// A model that always acts uses the whole budget, one observation per call
    #[test]
    fn prop_budget_bounds_model_calls(max_iterations in 0usize..8) {
        let llm = Arc::new(MockLlmService::repeating("Thought: more\nAction: search_web: topic"));
        let agent = ReactAgent::new(
            llm.clone(),
            ToolRegistry::standard(),
            AgentSettings {
                max_iterations,
                ..AgentSettings::default()
            },
        );

        let outcome = block_on(agent.run("question")).unwrap();

        prop_assert_eq!(llm.call_count(), max_iterations);
        prop_assert_eq!(outcome.iterations, max_iterations);
        prop_assert_eq!(outcome.transcript.matches("Observation:").count(), max_iterations);
        prop_assert_eq!(outcome.exit, ExitReason::BudgetExhausted);
    }

    /// Streaming relays every fragment unchanged and in order
    #[test]
    fn prop_streaming_preserves_fragments(fragments in proptest::collection::vec("[a-z ]{1,6}", 1..10)) {
        let llm = Arc::new(MockLlmService::new());
        let borrowed: Vec<&str> = fragments.iter().map(String::as_str).collect();
        llm.queue_fragments(&borrowed);
        let agent = ReactAgent::new(llm, ToolRegistry::standard(), AgentSettings::default());

        let received = block_on(async move {
            let (tx, mut rx) = event_channel();
            let run = tokio::spawn(async move { agent.run_streaming("q", tx).await });
            let mut received = Vec::new();
            while let Some(event) = rx.recv().await {
                if let AgentEvent::Token { content, .. } = event {
                    received.push(content);
                }
            }
            run.await.unwrap().unwrap();
            received
        });

        prop_assert_eq!(received, fragments);
    }
}
