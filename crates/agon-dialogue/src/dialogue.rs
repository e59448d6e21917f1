//! Protocol-governed dialogues
//!
//! A [`Dialogue`] is nothing but its protocol and the ordered list of moves made
//! so far. Termination, the next legal acts and each speaker's commitments are
//! all derived from that list on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::error::DialogueError;
use crate::knowledge::{FormalArgument, KnowledgeBase, Proposition};
use crate::protocol::Protocol;
use crate::speech_act::{DialogueType, SpeechAct};

/// Acts a dialogue may open with
const OPENING_ACTS: [SpeechAct; 2] = [SpeechAct::Claim, SpeechAct::Question];

/// What a move says
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MoveContent {
    Proposition(Proposition),
    Argument(FormalArgument),
    Text(String),
}

impl MoveContent {
    /// The proposition a speaker is committed to by asserting this content
    pub fn proposition(&self) -> Proposition {
        match self {
            Self::Proposition(p) => p.clone(),
            Self::Argument(a) => a.conclusion.clone(),
            Self::Text(t) => Proposition::new(t),
        }
    }
}

/// One turn in a protocol-governed exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueMove {
    /// Unique ID
    pub id: Uuid,
    pub speaker: String,
    pub act: SpeechAct,
    pub content: MoveContent,
    /// Earlier move this one answers
    pub target: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
}

impl DialogueMove {
    pub fn new(speaker: &str, act: SpeechAct, content: MoveContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker: speaker.to_string(),
            act,
            content,
            target: None,
            timestamp: Utc::now(),
        }
    }

    /// Convenience constructor for a move about a plain proposition
    pub fn about(speaker: &str, act: SpeechAct, proposition: &str) -> Self {
        Self::new(speaker, act, MoveContent::Proposition(Proposition::new(proposition)))
    }

    pub fn replying_to(mut self, target: Uuid) -> Self {
        self.target = Some(target);
        self
    }
}

/// An append-only, protocol-validated move history
#[derive(Debug, Clone)]
pub struct Dialogue {
    id: Uuid,
    protocol: Protocol,
    moves: Vec<DialogueMove>,
}

impl Dialogue {
    pub fn new(dialogue_type: DialogueType) -> Self {
        Self::with_protocol(Protocol::new(dialogue_type))
    }

    pub fn with_protocol(protocol: Protocol) -> Self {
        Self {
            id: Uuid::new_v4(),
            protocol,
            moves: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn history(&self) -> &[DialogueMove] {
        &self.moves
    }

    pub fn last_act(&self) -> Option<SpeechAct> {
        self.moves.last().map(|m| m.act)
    }

    pub fn is_terminated(&self) -> bool {
        self.protocol.is_terminal_state(&self.moves)
    }

    /// Acts that may be played next
    pub fn allowed_moves(&self) -> BTreeSet<SpeechAct> {
        if self.is_terminated() {
            return BTreeSet::new();
        }
        match self.last_act() {
            None => OPENING_ACTS.into_iter().collect(),
            Some(last) => self.protocol.allowed_responses(last),
        }
    }

    /// Distinct speakers in order of first appearance
    pub fn participants(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for m in &self.moves {
            if !seen.contains(&m.speaker.as_str()) {
                seen.push(&m.speaker);
            }
        }
        seen
    }

    /// Validate and append a move
    pub fn make_move(&mut self, next: DialogueMove) -> Result<&DialogueMove, DialogueError> {
        if let Err(e) = self.check(&next) {
            tracing::debug!(
                dialogue = %self.id,
                speaker = %next.speaker,
                act = %next.act,
                error = %e,
                "Move rejected"
            );
            return Err(e);
        }
        self.moves.push(next);
        Ok(&self.moves[self.moves.len() - 1])
    }

    fn check(&self, next: &DialogueMove) -> Result<(), DialogueError> {
        if self.is_terminated() {
            return Err(DialogueError::DialogueTerminated);
        }
        match self.last_act() {
            None if !OPENING_ACTS.contains(&next.act) => {
                return Err(DialogueError::IllegalOpening(next.act));
            }
            Some(last) if !self.protocol.is_valid_move(last, next.act) => {
                return Err(DialogueError::IllegalMove {
                    from: last,
                    to: next.act,
                });
            }
            _ => {}
        }
        if let Some(target) = next.target {
            if !self.moves.iter().any(|m| m.id == target) {
                return Err(DialogueError::UnknownTarget(target));
            }
        }
        Ok(())
    }

    /// Everything `speaker` is committed to after the moves so far.
    ///
    /// Asserting acts add their content, ARGUE adds the whole argument and
    /// RETRACT withdraws the proposition. Questions, challenges and
    /// acknowledgements commit to nothing.
    pub fn commitments(&self, speaker: &str) -> KnowledgeBase {
        let mut store = KnowledgeBase::new();
        for m in self.moves.iter().filter(|m| m.speaker == speaker) {
            match (m.act, &m.content) {
                (SpeechAct::Argue, MoveContent::Argument(argument)) => {
                    store.add_argument(argument.clone());
                }
                (
                    SpeechAct::Claim
                    | SpeechAct::Argue
                    | SpeechAct::Support
                    | SpeechAct::Refute
                    | SpeechAct::Concede,
                    content,
                ) => store.add_proposition(content.proposition()),
                (SpeechAct::Retract, content) => {
                    store.remove_proposition(&content.proposition().content);
                }
                (SpeechAct::Question | SpeechAct::Challenge | SpeechAct::Understand, _) => {}
            }
        }
        store
    }
}
