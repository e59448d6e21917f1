//! Runtime errors

use agon_core::CoreError;

/// Errors that stop a debate from being set up or run
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("A debate needs at least two agents, got {0}")]
    NotEnoughAgents(usize),
    #[error("Agent already registered: {0}")]
    DuplicateAgent(String),
    #[error(transparent)]
    Core(#[from] CoreError),
}
