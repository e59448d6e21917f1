//! Debate phases
//!
//! Phases form a fixed total order and only ever advance:
//! `Opening -> MainArguments -> Rebuttals -> Closing -> Concluded`.

use serde::{Deserialize, Serialize};

use crate::argument::ArgumentType;

/// One of the five stages of a phase-based debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    Opening,
    MainArguments,
    Rebuttals,
    Closing,
    Concluded,
}

impl DebatePhase {
    /// Phases in which arguments are produced, in order
    pub const ACTIVE: [DebatePhase; 4] = [
        DebatePhase::Opening,
        DebatePhase::MainArguments,
        DebatePhase::Rebuttals,
        DebatePhase::Closing,
    ];

    /// Number of turns allotted to this phase
    pub fn turn_budget(&self) -> u32 {
        match self {
            Self::Opening => 2,
            Self::MainArguments => 6,
            Self::Rebuttals => 4,
            Self::Closing => 2,
            Self::Concluded => 0,
        }
    }

    /// Argument types permitted in this phase, cycled through by round
    pub fn argument_cycle(&self) -> &'static [ArgumentType] {
        match self {
            Self::Opening => &[ArgumentType::OpeningStatement],
            Self::MainArguments => &[ArgumentType::Claim, ArgumentType::Evidence],
            Self::Rebuttals => &[ArgumentType::Rebuttal],
            Self::Closing => &[ArgumentType::ClosingStatement],
            Self::Concluded => &[],
        }
    }

    /// Argument type for a turn within this phase.
    ///
    /// `round` is the turn index within the phase divided by the number of
    /// debaters, so every debater walks the same cycle.
    pub fn argument_type_for_round(&self, round: u32) -> Option<ArgumentType> {
        let cycle = self.argument_cycle();
        if cycle.is_empty() {
            return None;
        }
        Some(cycle[round as usize % cycle.len()])
    }

    /// The phase that follows this one (Concluded is absorbing)
    pub fn next(&self) -> DebatePhase {
        match self {
            Self::Opening => Self::MainArguments,
            Self::MainArguments => Self::Rebuttals,
            Self::Rebuttals => Self::Closing,
            Self::Closing | Self::Concluded => Self::Concluded,
        }
    }

    /// Human-readable label used in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::MainArguments => "main arguments",
            Self::Rebuttals => "rebuttals",
            Self::Closing => "closing",
            Self::Concluded => "concluded",
        }
    }

    /// Total turns across every active phase
    pub fn total_turns() -> u32 {
        Self::ACTIVE.iter().map(|p| p.turn_budget()).sum()
    }
}
