//! The boundary between debaters and whatever produces their text

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// The backend could not be reached at all
    #[error("{provider} unreachable: {reason}")]
    Unreachable { provider: String, reason: String },
    /// The backend answered with a non-success status
    #[error("{provider} rejected the request with status {status}")]
    Rejected { provider: String, status: u16 },
    #[error("{provider} sent an unreadable reply: {reason}")]
    Malformed { provider: String, reason: String },
    #[error("{0} is rate limiting requests")]
    RateLimited(String),
    /// Backend deliberately switched off
    #[error("{0} is offline")]
    Offline(String),
}

/// One request for a debater's next contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// Persona and strategy instruction
    pub system: String,
    /// Motion, phase, recent arguments and the task
    pub prompt: String,
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl LlmRequest {
    pub fn with_role(system: &str, prompt: &str) -> Self {
        Self {
            system: system.to_string(),
            prompt: prompt.to_string(),
            temperature: 0.7,
            max_tokens: 512,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Raw completion; trimming and blank checks happen in [`crate::generate`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    /// Model that actually answered
    pub model: String,
    pub latency_ms: u64,
}

/// A source of debate text.
///
/// Implementations report failures as [`LlmError`]; callers normally go
/// through [`crate::generate`], which also bounds the call in time.
#[async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Cheap reachability check, used for up-front warnings only
    async fn is_available(&self) -> bool;

    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}
