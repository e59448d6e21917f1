//! Dialogue errors

use uuid::Uuid;

use crate::speech_act::SpeechAct;

/// Errors from building protocols or making moves
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogueError {
    #[error("Unknown speech act: {0}")]
    UnknownSpeechAct(String),

    #[error("Unknown dialogue type: {0}")]
    UnknownDialogueType(String),

    #[error("{to} is not a legal response to {from}")]
    IllegalMove { from: SpeechAct, to: SpeechAct },

    #[error("A dialogue cannot open with {0}")]
    IllegalOpening(SpeechAct),

    #[error("Dialogue has terminated")]
    DialogueTerminated,

    #[error("Target move not found: {0}")]
    UnknownTarget(Uuid),
}
