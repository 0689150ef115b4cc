//! LLM provider abstraction
//!
//! A chat-completion gateway with a blocking mode and a token-streaming mode.

mod error;
mod openai;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIService;
pub use types::*;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::sync::Arc;

/// Incremental text fragments of one streamed completion, in arrival order.
///
/// Exhaustion of the stream signals completion; there is no terminator item.
pub type TokenStream = BoxStream<'static, Result<String, LlmError>>;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a blocking completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Open a token stream for the request.
    ///
    /// Implementations reject requests without `max_tokens`: unbounded
    /// streamed generation is never allowed.
    async fn stream(&self, request: &LlmRequest) -> Result<TokenStream, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    messages = request.messages.len(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "LLM request failed"
                );
            }
        }

        result
    }

    async fn stream(&self, request: &LlmRequest) -> Result<TokenStream, LlmError> {
        let start = std::time::Instant::now();
        let messages = request.messages.len();
        let mut tokens = match self.inner.stream(request).await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %start.elapsed().as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "LLM stream failed to open"
                );
                return Err(e);
            }
        };

        tracing::debug!(
            model = %self.model_id,
            duration_ms = %start.elapsed().as_millis(),
            messages,
            "LLM stream opened"
        );

        let model = self.model_id.clone();
        let logged = async_stream::stream! {
            let mut fragments = 0usize;
            while let Some(item) = tokens.next().await {
                match &item {
                    Ok(_) => fragments += 1,
                    Err(e) => {
                        tracing::error!(
                            model = %model,
                            duration_ms = %start.elapsed().as_millis(),
                            fragments,
                            error = %e.message,
                            kind = ?e.kind,
                            "LLM stream failed"
                        );
                        yield item;
                        return;
                    }
                }
                yield item;
            }
            tracing::info!(
                model = %model,
                duration_ms = %start.elapsed().as_millis(),
                messages,
                fragments,
                "LLM stream completed"
            );
        };
        Ok(logged.boxed())
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
