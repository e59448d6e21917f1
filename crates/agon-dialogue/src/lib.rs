//! # Agon Dialogue
//!
//! Formally constrained dialogues in the Walton-Krabbe style.
//!
//! ## Key Types
//!
//! - [`SpeechAct`] - The move vocabulary (CLAIM, QUESTION, CHALLENGE, ...)
//! - [`Protocol`] - Legal-response table plus termination rules for one [`DialogueType`]
//! - [`Dialogue`] - An append-only, protocol-validated move history
//! - [`KnowledgeBase`] - Propositions and formal arguments with support/attack queries
//!
//! ## Quick Start
//!
//! ```rust
//! use agon_dialogue::{DialogueType, Protocol, SpeechAct};
//!
//! let protocol = Protocol::new(DialogueType::Persuasion);
//!
//! assert!(protocol.is_valid_move(SpeechAct::Claim, SpeechAct::Challenge));
//! assert!(protocol.is_terminal_sequence(&[SpeechAct::Claim, SpeechAct::Concede]));
//! assert!(!protocol.is_terminal_sequence(&[SpeechAct::Claim]));
//! ```
//!
//! ## Knowledge Base
//!
//! ```rust
//! use agon_dialogue::{KnowledgeBase, Proposition};
//!
//! let mut kb = KnowledgeBase::new();
//! kb.add_proposition(Proposition::new("A"));
//! assert!(kb.is_consistent());
//!
//! kb.add_proposition(Proposition::new("¬A"));
//! assert!(!kb.is_consistent());
//! ```

pub mod dialogue;
pub mod error;
pub mod knowledge;
pub mod protocol;
pub mod speech_act;

pub use dialogue::{Dialogue, DialogueMove, MoveContent};
pub use error::DialogueError;
pub use knowledge::{FormalArgument, KnowledgeBase, Proposition, NEGATION_MARKER};
pub use protocol::{Protocol, TerminationRule};
pub use speech_act::{DialogueType, SpeechAct};
