//! Error types for debate state transitions

use crate::phase::DebatePhase;

/// Errors raised when mutating a [`DebateState`](crate::DebateState)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Debate has concluded and is read-only")]
    DebateConcluded,

    #[error("Phase cannot move backward from {from:?} to {to:?}")]
    PhaseRegression { from: DebatePhase, to: DebatePhase },

    #[error("The concluded phase is entered only by declaring a winner")]
    ConclusionRequired,

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),
}
