//! Mock implementations for testing
//!
//! These mocks drive both loops without network I/O.

use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService, TokenStream};
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One queued model turn: the fragments it streams in, then an optional
/// error raised after the last fragment
struct Scripted {
    fragments: Vec<String>,
    trailing_error: Option<LlmError>,
}

impl Scripted {
    fn fragments(fragments: Vec<String>) -> Self {
        Self {
            fragments,
            trailing_error: None,
        }
    }
}

/// An `Err` fails the call before any fragment is produced
type Reply = Result<Scripted, LlmError>;

/// Mock LLM service that replays queued replies.
///
/// Blocking calls receive the fragments joined; streaming calls receive them
/// one item at a time. When the queue is empty the fallback reply is used if
/// set, otherwise the call fails.
#[allow(dead_code)]
pub struct MockLlmService {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Option<Vec<String>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

#[allow(dead_code)]
impl MockLlmService {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: None,
            model_id: "mock-model".to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Mock that answers every call with the same text
    pub fn repeating(text: impl Into<String>) -> Self {
        Self {
            fallback: Some(vec![text.into()]),
            ..Self::new()
        }
    }

    /// Queue a reply delivered as a single fragment
    pub fn queue_text(&self, text: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(Scripted::fragments(vec![text.into()])));
    }

    /// Queue a reply delivered as the given fragments
    pub fn queue_fragments(&self, fragments: &[&str]) {
        let fragments = fragments.iter().map(ToString::to_string).collect();
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(Scripted::fragments(fragments)));
    }

    /// Queue a reply that streams `fragments` and then fails mid-stream.
    /// Blocking calls see only the error.
    pub fn queue_fragments_then_error(&self, fragments: &[&str], error: LlmError) {
        let scripted = Scripted {
            fragments: fragments.iter().map(ToString::to_string).collect(),
            trailing_error: Some(error),
        };
        self.replies.lock().unwrap().push_back(Ok(scripted));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_reply(&self, request: &LlmRequest) -> Reply {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return reply;
        }
        self.fallback
            .clone()
            .map(Scripted::fragments)
            .ok_or_else(|| LlmError::network("No mock response queued"))
    }
}

impl Default for MockLlmService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let scripted = self.next_reply(request)?;
        match scripted.trailing_error {
            Some(error) => Err(error),
            None => Ok(LlmResponse::from_text(scripted.fragments.concat())),
        }
    }

    async fn stream(&self, request: &LlmRequest) -> Result<TokenStream, LlmError> {
        if request.max_tokens.is_none() {
            return Err(LlmError::invalid_request(
                "max_tokens is required for streaming",
            ));
        }
        let scripted = self.next_reply(request)?;
        let items = scripted
            .fragments
            .into_iter()
            .map(Ok)
            .chain(scripted.trailing_error.map(Err));
        Ok(futures::stream::iter(items).boxed())
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
