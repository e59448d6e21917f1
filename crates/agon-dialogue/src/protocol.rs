//! Dialogue protocols
//!
//! A [`Protocol`] is selected by [`DialogueType`] and carries two pieces of data:
//! a transition table (which acts may immediately answer which) and an ordered
//! list of [`TerminationRule`]s. A history is terminal as soon as any rule holds.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::dialogue::DialogueMove;
use crate::error::DialogueError;
use crate::speech_act::{DialogueType, SpeechAct};

use crate::speech_act::SpeechAct::{
    Argue, Challenge, Claim, Concede, Question, Refute, Retract, Support, Understand,
};

type Table = &'static [(SpeechAct, &'static [SpeechAct])];

const INFORMATION_SEEKING: Table = &[
    (Question, &[Claim, Retract]),
    (Claim, &[Question, Understand, Challenge]),
    (Challenge, &[Support, Retract]),
    (Support, &[Question, Understand]),
    (Understand, &[Question]),
    (Retract, &[Question]),
];

const INQUIRY: Table = &[
    (Claim, &[Question, Challenge, Support, Refute, Understand, Concede]),
    (Question, &[Claim, Argue, Understand, Retract]),
    (Challenge, &[Argue, Support, Retract, Concede]),
    (Argue, &[Question, Challenge, Support, Refute, Understand, Concede]),
    (Support, &[Question, Challenge, Understand, Concede]),
    (Refute, &[Argue, Challenge, Concede, Retract]),
    (Understand, &[Question, Claim, Understand, Concede]),
    (Concede, &[Claim, Question, Understand, Concede]),
    (Retract, &[Claim, Question]),
];

// CONCEDE and UNDERSTAND have no entry: nothing is licensed after them.
const PERSUASION: Table = &[
    (Claim, &[Question, Challenge, Refute, Concede]),
    (Question, &[Claim, Argue, Retract]),
    (Challenge, &[Argue, Retract]),
    (Argue, &[Question, Challenge, Refute, Concede]),
    (Support, &[Challenge, Concede]),
    (Refute, &[Argue, Challenge, Concede, Retract]),
    (Retract, &[Claim, Retract]),
];

const NEGOTIATION: Table = &[
    (Claim, &[Claim, Question, Challenge, Refute, Concede]),
    (Question, &[Claim, Argue]),
    (Challenge, &[Argue, Retract]),
    (Argue, &[Claim, Challenge, Refute, Concede]),
    (Refute, &[Claim, Argue, Retract]),
    (Retract, &[Claim, Retract]),
];

const DELIBERATION: Table = &[
    (Claim, &[Question, Challenge, Support, Refute, Understand]),
    (Question, &[Claim, Argue]),
    (Challenge, &[Argue, Support, Retract]),
    (Argue, &[Challenge, Support, Refute, Understand, Concede]),
    (Support, &[Claim, Challenge, Understand, Concede]),
    (Refute, &[Argue, Concede, Retract]),
    (Understand, &[Claim, Support, Understand, Concede]),
    (Concede, &[Claim, Support, Understand, Concede]),
    (Retract, &[Claim, Question]),
];

const ERISTIC: Table = &[
    (Claim, &[Claim, Challenge, Refute, Concede, Retract]),
    (Challenge, &[Challenge, Argue, Refute, Concede, Retract]),
    (Argue, &[Argue, Challenge, Refute, Concede, Retract]),
    (Refute, &[Refute, Argue, Challenge, Concede, Retract]),
];

/// A predicate over the tail of a move history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationRule {
    /// The last `length` moves all use one of `acts`
    TrailingRun {
        acts: &'static [SpeechAct],
        length: usize,
    },
    /// The history holds more than this many moves
    LengthExceeds(usize),
    /// The most recent move is this act
    LastMove(SpeechAct),
    /// The last `2 * pairs` moves split into identical consecutive act pairs.
    ///
    /// A loop heuristic over a fixed window; it does not see cycles whose
    /// period is not two moves.
    RepeatingPairs { pairs: usize },
}

impl TerminationRule {
    pub fn is_satisfied(&self, acts: &[SpeechAct]) -> bool {
        match self {
            Self::TrailingRun { acts: allowed, length } => {
                *length > 0
                    && acts.len() >= *length
                    && acts[acts.len() - length..]
                        .iter()
                        .all(|act| allowed.contains(act))
            }
            Self::LengthExceeds(limit) => acts.len() > *limit,
            Self::LastMove(act) => acts.last() == Some(act),
            Self::RepeatingPairs { pairs } => {
                let window = pairs * 2;
                if *pairs < 2 || acts.len() < window {
                    return false;
                }
                let tail = &acts[acts.len() - window..];
                let first = &tail[..2];
                tail.chunks(2).all(|pair| pair == first)
            }
        }
    }
}

impl fmt::Display for TerminationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrailingRun { acts, length } => {
                let names: Vec<&str> = acts.iter().map(|a| a.as_str()).collect();
                write!(f, "last {} moves in {{{}}}", length, names.join(", "))
            }
            Self::LengthExceeds(limit) => write!(f, "more than {} moves", limit),
            Self::LastMove(act) => write!(f, "last move is {}", act),
            Self::RepeatingPairs { pairs } => {
                write!(f, "same move pair repeated {} times", pairs)
            }
        }
    }
}

/// Legal-move table and termination rules for one dialogue type
#[derive(Debug, Clone)]
pub struct Protocol {
    dialogue_type: DialogueType,
    transitions: HashMap<SpeechAct, BTreeSet<SpeechAct>>,
    termination: Vec<TerminationRule>,
}

impl Protocol {
    /// Build the protocol for a dialogue type
    pub fn new(dialogue_type: DialogueType) -> Self {
        let (table, termination): (Table, Vec<TerminationRule>) = match dialogue_type {
            DialogueType::InformationSeeking => (
                INFORMATION_SEEKING,
                vec![
                    TerminationRule::LastMove(Understand),
                    TerminationRule::LengthExceeds(20),
                ],
            ),
            DialogueType::Inquiry => (
                INQUIRY,
                vec![
                    TerminationRule::TrailingRun {
                        acts: &[Understand, Concede],
                        length: 3,
                    },
                    TerminationRule::LengthExceeds(25),
                    TerminationRule::TrailingRun {
                        acts: &[Understand],
                        length: 2,
                    },
                    TerminationRule::RepeatingPairs { pairs: 3 },
                ],
            ),
            DialogueType::Persuasion => (
                PERSUASION,
                vec![
                    TerminationRule::LastMove(Concede),
                    TerminationRule::LengthExceeds(30),
                    TerminationRule::TrailingRun {
                        acts: &[Retract],
                        length: 2,
                    },
                ],
            ),
            DialogueType::Negotiation => (
                NEGOTIATION,
                vec![
                    TerminationRule::LastMove(Concede),
                    TerminationRule::TrailingRun {
                        acts: &[Retract],
                        length: 2,
                    },
                    TerminationRule::LengthExceeds(40),
                ],
            ),
            DialogueType::Deliberation => (
                DELIBERATION,
                vec![
                    TerminationRule::TrailingRun {
                        acts: &[Understand, Concede, Support],
                        length: 3,
                    },
                    TerminationRule::LengthExceeds(30),
                    TerminationRule::RepeatingPairs { pairs: 3 },
                ],
            ),
            DialogueType::Eristic => (
                ERISTIC,
                vec![
                    TerminationRule::LastMove(Concede),
                    TerminationRule::LastMove(Retract),
                    TerminationRule::LengthExceeds(20),
                ],
            ),
        };

        let transitions = table
            .iter()
            .map(|(act, responses)| (*act, responses.iter().copied().collect()))
            .collect();

        Self {
            dialogue_type,
            transitions,
            termination,
        }
    }

    /// Build a protocol from a dialogue type name such as `"inquiry"`
    pub fn from_name(name: &str) -> Result<Self, DialogueError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn dialogue_type(&self) -> DialogueType {
        self.dialogue_type
    }

    pub fn termination_rules(&self) -> &[TerminationRule] {
        &self.termination
    }

    /// Whether `next` may immediately answer `current`
    pub fn is_valid_move(&self, current: SpeechAct, next: SpeechAct) -> bool {
        self.transitions
            .get(&current)
            .is_some_and(|responses| responses.contains(&next))
    }

    /// Acts licensed as a response to `last`; empty when none are
    pub fn allowed_responses(&self, last: SpeechAct) -> BTreeSet<SpeechAct> {
        self.transitions.get(&last).cloned().unwrap_or_default()
    }

    /// Whether a move history has reached a terminal state
    pub fn is_terminal_state(&self, history: &[DialogueMove]) -> bool {
        let acts: Vec<SpeechAct> = history.iter().map(|m| m.act).collect();
        self.is_terminal_sequence(&acts)
    }

    /// Whether a bare act sequence has reached a terminal state
    pub fn is_terminal_sequence(&self, acts: &[SpeechAct]) -> bool {
        self.terminating_rule(acts).is_some()
    }

    /// The first termination rule that holds for `acts`, if any
    pub fn terminating_rule(&self, acts: &[SpeechAct]) -> Option<&TerminationRule> {
        self.termination.iter().find(|rule| rule.is_satisfied(acts))
    }

    /// Index and acts of the first illegal transition in `acts`
    pub fn first_illegal_transition(
        &self,
        acts: &[SpeechAct],
    ) -> Option<(usize, SpeechAct, SpeechAct)> {
        acts.windows(2)
            .enumerate()
            .find(|(_, pair)| !self.is_valid_move(pair[0], pair[1]))
            .map(|(i, pair)| (i + 1, pair[0], pair[1]))
    }
}
