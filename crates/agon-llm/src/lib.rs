//! # Agon LLM
//!
//! The text-generation boundary used by debating agents.
//!
//! ## Supported Backends
//!
//! | Provider | Type | Notes |
//! |----------|------|-------|
//! | Ollama | Local | `OLLAMA_URL`, default `http://localhost:11434` |
//! | Mock | Testing | Canned, cycling or prompt-aware responses |
//! | Offline | Testing | Always fails, forcing every agent into fallback mode |
//!
//! ## Bounded generation
//!
//! Agents never call a provider directly. [`generate`] wraps the call in a
//! timeout and folds every outcome into a [`Generation`] value so callers can
//! match on it instead of handling errors.
//!
//! ```rust
//! use std::time::Duration;
//! use agon_llm::{generate, Generation, LlmRequest, MockProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let llm = MockProvider::constant("Costs fall because demand rises.");
//!     let request = LlmRequest::with_role("You are a debater.", "Make your case.");
//!
//!     match generate(&llm, request, Duration::from_secs(5)).await {
//!         Generation::Generated(text) => println!("{}", text),
//!         Generation::TimedOut | Generation::Failed(_) => println!("fallback"),
//!     }
//! }
//! ```

pub mod config;
pub mod generation;
pub mod mock;
pub mod ollama;
pub mod provider;

pub use config::{ConfigError, LlmConfig, ProviderKind};
pub use generation::{generate, Generation};
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use provider::{LlmError, LlmProvider, LlmRequest, LlmResponse};
