//! # Agon Runtime
//!
//! Tokio-based debate orchestration.
//!
//! ```rust
//! use std::sync::Arc;
//! use agon_core::Position;
//! use agon_llm::MockProvider;
//! use agon_runtime::{DebateOrchestrator, OrchestratorConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = OrchestratorConfig { seed: Some(7), ..Default::default() };
//!     let orchestrator = DebateOrchestrator::new(Arc::new(MockProvider::debater()), config)
//!         .with_agent("pro", Position::For)
//!         .and_then(|o| o.with_agent("con", Position::Against))
//!         .unwrap();
//!
//!     let state = orchestrator.run("Remote work should be the default").await.unwrap();
//!     assert_eq!(state.arguments().len(), 14);
//!     println!("winner: {:?}", state.winner());
//! }
//! ```

pub mod agent;
pub mod audience;
pub mod error;
pub mod orchestrator;

pub use agent::{
    AgentConfig, DebateAgent, DebateStyle, OpponentProfile, PerformanceHistory, Strategy,
    FALLBACK_PERSUASIVENESS,
};
pub use audience::AudienceSimulator;
pub use error::RuntimeError;
pub use orchestrator::{DebateOrchestrator, OrchestratorConfig};
