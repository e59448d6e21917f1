//! Mock LLM provider for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::provider::{LlmError, LlmProvider, LlmRequest, LlmResponse};

#[derive(Debug)]
enum Mode {
    /// Cycle through canned responses
    Canned(Vec<String>),
    /// Answer according to the argument type named in the prompt
    Debater,
    /// Every call fails
    Offline,
}

/// A mock LLM provider that returns predefined responses
#[derive(Debug)]
pub struct MockProvider {
    /// Name of this mock
    pub name: String,
    mode: Mode,
    /// Current response index
    index: AtomicUsize,
    /// Calls served so far, successful or not
    calls: AtomicUsize,
    /// Simulated latency in ms
    latency_ms: u64,
}

impl MockProvider {
    fn with_mode(name: &str, mode: Mode) -> Self {
        Self {
            name: name.to_string(),
            mode,
            index: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            latency_ms: 0,
        }
    }

    /// Create a new mock provider with given responses
    pub fn new(responses: Vec<String>) -> Self {
        Self::with_mode("mock", Mode::Canned(responses))
    }

    /// Create a mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a mock that writes plausible debate text for each argument type
    pub fn debater() -> Self {
        Self::with_mode("debater-mock", Mode::Debater)
    }

    /// Create a mock that is never available
    pub fn offline() -> Self {
        Self::with_mode("offline", Mode::Offline)
    }

    /// Delay every completion by `latency_ms`
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Number of completion calls received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn debater_response(request: &LlmRequest) -> String {
        let prompt = request.prompt.to_lowercase();
        let stance = if prompt.contains("position: against") {
            "this proposal does more harm than good"
        } else {
            "this proposal is the right course"
        };
        // The requested argument type is named on the final line
        let task = prompt.lines().last().unwrap_or_default();

        if task.contains("opening statement") {
            format!(
                "Ladies and gentlemen, I will argue that {}. First, consider the costs. \
                 Second, consider who benefits. Therefore the case is clear.",
                stance
            )
        } else if task.contains("closing statement") {
            format!(
                "In conclusion, we have shown that {}. The evidence consistently pointed \
                 one way, and the objections raised did not survive scrutiny.",
                stance
            )
        } else if task.contains("rebuttal") {
            "My opponent's claim ignores the data. However, research shows the opposite: \
             a 2021 study found a 35% improvement. Therefore their conclusion does not follow."
                .to_string()
        } else if task.contains("evidence") {
            "According to a peer-reviewed study published by Dr. Alvarez, 42% of cases \
             improved. Data from 12 countries confirms the trend, and statistics show \
             consistent results."
                .to_string()
        } else {
            format!(
                "I maintain that {} because the benefits outweigh the risks. Furthermore, \
                 the alternatives are costlier. Consequently we should act.",
                stance
            )
        }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        !matches!(self.mode, Mode::Offline)
    }

    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();
        self.calls.fetch_add(1, Ordering::Relaxed);

        if self.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        }

        let content = match &self.mode {
            Mode::Offline => return Err(LlmError::Offline(self.name.clone())),
            Mode::Debater => Self::debater_response(&request),
            Mode::Canned(responses) if responses.is_empty() => String::new(),
            Mode::Canned(responses) => {
                let idx = self.index.fetch_add(1, Ordering::Relaxed);
                responses[idx % responses.len()].clone()
            }
        };

        Ok(LlmResponse {
            content,
            model: self.name.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
