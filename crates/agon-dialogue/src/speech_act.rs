//! Speech acts and dialogue types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DialogueError;

/// Category of conversational move
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeechAct {
    Claim,
    Question,
    Challenge,
    Argue,
    Concede,
    Retract,
    Support,
    Refute,
    Understand,
}

impl SpeechAct {
    pub const ALL: [SpeechAct; 9] = [
        SpeechAct::Claim,
        SpeechAct::Question,
        SpeechAct::Challenge,
        SpeechAct::Argue,
        SpeechAct::Concede,
        SpeechAct::Retract,
        SpeechAct::Support,
        SpeechAct::Refute,
        SpeechAct::Understand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claim => "CLAIM",
            Self::Question => "QUESTION",
            Self::Challenge => "CHALLENGE",
            Self::Argue => "ARGUE",
            Self::Concede => "CONCEDE",
            Self::Retract => "RETRACT",
            Self::Support => "SUPPORT",
            Self::Refute => "REFUTE",
            Self::Understand => "UNDERSTAND",
        }
    }
}

impl fmt::Display for SpeechAct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uppercase and fold `-`/space into `_`
fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

impl FromStr for SpeechAct {
    type Err = DialogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize(s);
        Self::ALL
            .into_iter()
            .find(|act| act.as_str() == name)
            .ok_or_else(|| DialogueError::UnknownSpeechAct(s.to_string()))
    }
}

/// Formal genre of a protocol-governed conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogueType {
    InformationSeeking,
    Inquiry,
    Persuasion,
    Negotiation,
    Deliberation,
    Eristic,
}

impl DialogueType {
    pub const ALL: [DialogueType; 6] = [
        DialogueType::InformationSeeking,
        DialogueType::Inquiry,
        DialogueType::Persuasion,
        DialogueType::Negotiation,
        DialogueType::Deliberation,
        DialogueType::Eristic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InformationSeeking => "INFORMATION_SEEKING",
            Self::Inquiry => "INQUIRY",
            Self::Persuasion => "PERSUASION",
            Self::Negotiation => "NEGOTIATION",
            Self::Deliberation => "DELIBERATION",
            Self::Eristic => "ERISTIC",
        }
    }
}

impl fmt::Display for DialogueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogueType {
    type Err = DialogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize(s);
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| DialogueError::UnknownDialogueType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_speech_acts() {
        assert_eq!("claim".parse::<SpeechAct>(), Ok(SpeechAct::Claim));
        assert_eq!(" Understand ".parse::<SpeechAct>(), Ok(SpeechAct::Understand));
        assert_eq!(
            "shrug".parse::<SpeechAct>(),
            Err(DialogueError::UnknownSpeechAct("shrug".into()))
        );
    }

    #[test]
    fn test_parse_dialogue_types() {
        assert_eq!(
            "information-seeking".parse::<DialogueType>(),
            Ok(DialogueType::InformationSeeking)
        );
        assert_eq!("INQUIRY".parse::<DialogueType>(), Ok(DialogueType::Inquiry));
        assert!("debate".parse::<DialogueType>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for act in SpeechAct::ALL {
            assert_eq!(act.to_string().parse::<SpeechAct>(), Ok(act));
        }
    }
}
