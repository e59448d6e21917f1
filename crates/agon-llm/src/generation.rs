//! Timeout-bounded text generation

use std::time::Duration;

use crate::provider::{LlmProvider, LlmRequest};

/// Outcome of one bounded generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Generated(String),
    TimedOut,
    Failed(String),
}

/// Ask `provider` for a completion, giving up after `timeout`.
///
/// Provider errors, timeouts and blank completions never escape as errors;
/// they come back as [`Generation::TimedOut`] or [`Generation::Failed`].
pub async fn generate<P>(provider: &P, request: LlmRequest, timeout: Duration) -> Generation
where
    P: LlmProvider + ?Sized,
{
    match tokio::time::timeout(timeout, provider.complete(request)).await {
        Ok(Ok(response)) => {
            let text = response.content.trim();
            if text.is_empty() {
                tracing::warn!(provider = provider.name(), "LLM returned empty text");
                Generation::Failed("empty response".to_string())
            } else {
                tracing::debug!(
                    provider = provider.name(),
                    model = %response.model,
                    latency_ms = response.latency_ms,
                    "Generated text"
                );
                Generation::Generated(text.to_string())
            }
        }
        Ok(Err(e)) => {
            tracing::warn!(provider = provider.name(), error = %e, "LLM call failed");
            Generation::Failed(e.to_string())
        }
        Err(_) => {
            tracing::warn!(
                provider = provider.name(),
                timeout_ms = timeout.as_millis() as u64,
                "LLM call timed out"
            );
            Generation::TimedOut
        }
    }
}
