//! Protocol behaviour across dialogue types, with a focus on loop detection

use agon_dialogue::{
    Dialogue, DialogueMove, DialogueType, FormalArgument, KnowledgeBase, MoveContent, Protocol,
    Proposition, SpeechAct, TerminationRule,
};
use SpeechAct::*;

#[test]
fn test_inquiry_detects_two_move_loop() {
    let protocol = Protocol::new(DialogueType::Inquiry);
    // (QUESTION, CLAIM) three times in a row
    let acts = [Claim, Question, Claim, Question, Claim, Question, Claim];
    assert!(protocol.is_terminal_sequence(&acts));
    assert_eq!(
        protocol.terminating_rule(&acts),
        Some(&TerminationRule::RepeatingPairs { pairs: 3 })
    );
}

#[test]
fn test_inquiry_loop_needs_full_window() {
    let protocol = Protocol::new(DialogueType::Inquiry);
    assert!(!protocol.is_terminal_sequence(&[Question, Claim, Question, Claim]));
    assert!(!protocol.is_terminal_sequence(&[Question, Claim, Question, Claim, Question]));
}

#[test]
fn test_inquiry_loop_window_misses_longer_cycles() {
    let protocol = Protocol::new(DialogueType::Inquiry);
    // A natural four-move cycle never lines up as three identical pairs
    let cycle = [Claim, Question, Argue, Challenge];
    let acts: Vec<SpeechAct> = cycle.iter().copied().cycle().take(12).collect();
    assert!(!protocol.is_terminal_sequence(&acts));

    // ...until the length limit catches it
    let acts: Vec<SpeechAct> = cycle.iter().copied().cycle().take(26).collect();
    assert_eq!(
        protocol.terminating_rule(&acts),
        Some(&TerminationRule::LengthExceeds(25))
    );
}

#[test]
fn test_inquiry_loop_breaks_when_pair_changes() {
    let protocol = Protocol::new(DialogueType::Inquiry);
    let acts = [Question, Claim, Question, Claim, Question, Argue];
    assert!(!protocol.is_terminal_sequence(&acts));
}

#[test]
fn test_tail_predicates_only_look_at_suffix() {
    let protocol = Protocol::new(DialogueType::Persuasion);
    let mut acts = vec![Claim, Concede];
    assert!(protocol.is_terminal_sequence(&acts));

    // The CONCEDE predicate is tail-based: appending moves can clear it
    acts.push(Claim);
    assert!(!protocol.is_terminal_sequence(&acts));
}

#[test]
fn test_length_predicate_stays_terminal() {
    let protocol = Protocol::new(DialogueType::Eristic);
    let mut acts: Vec<SpeechAct> = [Claim, Challenge].iter().copied().cycle().take(21).collect();
    assert!(protocol.is_terminal_sequence(&acts));
    acts.push(Refute);
    assert!(protocol.is_terminal_sequence(&acts));
}

#[test]
fn test_information_seeking_ends_on_understanding() {
    let mut dialogue = Dialogue::new(DialogueType::InformationSeeking);
    dialogue
        .make_move(DialogueMove::about("novice", Question, "What is the boiling point?"))
        .unwrap();
    dialogue
        .make_move(DialogueMove::about("expert", Claim, "100C at sea level"))
        .unwrap();
    assert!(!dialogue.is_terminated());
    dialogue
        .make_move(DialogueMove::about("novice", Understand, "100C at sea level"))
        .unwrap();
    assert!(dialogue.is_terminated());
}

#[test]
fn test_negotiation_and_deliberation_rules() {
    let negotiation = Protocol::new(DialogueType::Negotiation);
    assert!(negotiation.is_terminal_sequence(&[Claim, Claim, Concede]));
    assert!(negotiation.is_terminal_sequence(&[Claim, Challenge, Retract, Retract]));

    let deliberation = Protocol::new(DialogueType::Deliberation);
    assert!(deliberation.is_terminal_sequence(&[Claim, Support, Understand, Concede]));
    assert!(!deliberation.is_terminal_sequence(&[Claim, Support, Understand]));
}

#[test]
fn test_persuasion_dialogue_with_knowledge_base() {
    let mut dialogue = Dialogue::new(DialogueType::Persuasion);
    let claim = dialogue
        .make_move(DialogueMove::about("pro", Claim, "Cities should ban cars"))
        .unwrap()
        .id;
    let challenge = dialogue
        .make_move(DialogueMove::about("con", Challenge, "Cities should ban cars").replying_to(claim))
        .unwrap()
        .id;
    dialogue
        .make_move(
            DialogueMove::new(
                "pro",
                Argue,
                MoveContent::Argument(
                    FormalArgument::new(
                        vec![Proposition::new("Cars pollute"), Proposition::new("Pollution harms health")],
                        Proposition::new("Cities should ban cars"),
                    )
                    .with_scheme("consequences"),
                ),
            )
            .replying_to(challenge),
        )
        .unwrap();
    dialogue
        .make_move(DialogueMove::about("con", Concede, "Cities should ban cars"))
        .unwrap();

    assert!(dialogue.is_terminated());

    let pro: KnowledgeBase = dialogue.commitments("pro");
    let con: KnowledgeBase = dialogue.commitments("con");
    let motion = Proposition::new("Cities should ban cars");
    assert_eq!(pro.find_supporting_arguments(&motion).len(), 1);
    assert!(con.entails(&motion));
    assert!(pro.is_consistent());

    let json = serde_json::to_string(dialogue.history()).unwrap();
    assert!(json.contains("\"ARGUE\""));
}
