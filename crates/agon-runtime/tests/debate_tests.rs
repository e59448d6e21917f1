//! End-to-end debate runs against mock providers

use std::sync::Arc;

use agon_core::{ArgumentType, CoreError, DebatePhase, Position};
use agon_llm::{LlmProvider, MockProvider};
use agon_runtime::{DebateOrchestrator, OrchestratorConfig, RuntimeError, FALLBACK_PERSUASIVENESS};

fn two_sided<L: LlmProvider + ?Sized>(llm: Arc<L>, seed: u64) -> DebateOrchestrator<L> {
    let config = OrchestratorConfig {
        seed: Some(seed),
        ..Default::default()
    };
    DebateOrchestrator::new(llm, config)
        .with_agent("pro", Position::For)
        .and_then(|o| o.with_agent("con", Position::Against))
        .unwrap()
}

#[tokio::test]
async fn test_total_provider_failure_still_finishes() {
    let llm = Arc::new(MockProvider::offline());
    let state = two_sided(llm.clone(), 1)
        .run("Nuclear power is essential for decarbonisation")
        .await
        .unwrap();

    assert_eq!(state.arguments().len(), 14);
    assert!(state.winner().is_some());
    assert!(state.is_concluded());
    assert_eq!(state.phase(), DebatePhase::Concluded);
    assert!(state
        .arguments()
        .iter()
        .all(|a| a.metrics.persuasiveness == FALLBACK_PERSUASIVENESS));
    assert_eq!(llm.calls(), 14);
}

#[tokio::test]
async fn test_turn_schedule() {
    let state = two_sided(Arc::new(MockProvider::debater()), 2)
        .run("Homework should be abolished")
        .await
        .unwrap();

    use ArgumentType::*;
    let expected = [
        OpeningStatement,
        OpeningStatement,
        Claim,
        Claim,
        Evidence,
        Evidence,
        Claim,
        Claim,
        Rebuttal,
        Rebuttal,
        Rebuttal,
        Rebuttal,
        ClosingStatement,
        ClosingStatement,
    ];
    let types: Vec<ArgumentType> = state.arguments().iter().map(|a| a.argument_type).collect();
    assert_eq!(types, expected);

    for (i, arg) in state.arguments().iter().enumerate() {
        let speaker = if i % 2 == 0 { "pro" } else { "con" };
        assert_eq!(arg.agent, speaker);
        assert!(!arg.content.is_empty());
        assert_ne!(arg.phase, DebatePhase::Concluded);
    }

    let phases: Vec<DebatePhase> = state.arguments().iter().map(|a| a.phase).collect();
    assert_eq!(phases[..2], [DebatePhase::Opening; 2]);
    assert_eq!(phases[2..8], [DebatePhase::MainArguments; 6]);
    assert_eq!(phases[8..12], [DebatePhase::Rebuttals; 4]);
    assert_eq!(phases[12..], [DebatePhase::Closing; 2]);

    // Every rebuttal answers the other side
    for rebuttal in state.arguments().iter().filter(|a| a.argument_type == Rebuttal) {
        assert_eq!(rebuttal.references.len(), 1);
        let target = state
            .arguments()
            .iter()
            .find(|a| a.id == rebuttal.references[0])
            .unwrap();
        assert_ne!(target.agent, rebuttal.agent);
    }
}

#[tokio::test]
async fn test_final_scores_are_consistent() {
    let state = two_sided(Arc::new(MockProvider::debater()), 3)
        .run("Public transport should be free")
        .await
        .unwrap();

    let winner = state.winner().unwrap();
    let standings = state.standings();
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0].0, winner);

    for (name, summary) in state.performance() {
        assert_eq!(summary.argument_count, 7);
        assert_eq!(summary.audience_votes, state.audience_votes(name));
        assert!((0.0..=1.0).contains(&summary.overall));
        assert!((0.0..=1.0).contains(&summary.audience_share));
    }
}

#[tokio::test]
async fn test_seeded_runs_repeat() {
    let llm = Arc::new(MockProvider::debater());
    let first = two_sided(llm.clone(), 99).run("Cities should ban cars").await.unwrap();
    let second = two_sided(llm, 99).run("Cities should ban cars").await.unwrap();

    assert_eq!(first.audience_tally(), second.audience_tally());
    assert_eq!(first.winner(), second.winner());
    let scores = |s: &agon_core::DebateState| -> Vec<f64> {
        s.arguments().iter().map(|a| a.metrics.persuasiveness).collect()
    };
    assert_eq!(scores(&first), scores(&second));
}

#[tokio::test]
async fn test_three_debaters_share_the_schedule() {
    let orchestrator = two_sided(Arc::new(MockProvider::debater()), 4)
        .with_agent("moderate", Position::For)
        .unwrap();
    let state = orchestrator.run("Four-day work week").await.unwrap();

    assert_eq!(state.arguments().len(), 14);
    // Main arguments and rebuttals reach the third seat; opening and closing do not
    assert_eq!(state.arguments_by("moderate").count(), 3);
    assert_eq!(state.performance().len(), 3);
}

#[tokio::test]
async fn test_concluded_state_is_read_only() {
    let mut state = two_sided(Arc::new(MockProvider::offline()), 5)
        .run("Ban homework")
        .await
        .unwrap();

    let extra = state.arguments()[0].clone();
    assert_eq!(state.record_argument(extra), Err(CoreError::DebateConcluded));
    assert_eq!(state.add_audience_votes("pro", 1), Err(CoreError::DebateConcluded));
}

#[tokio::test]
async fn test_orchestrator_accepts_trait_objects() {
    let llm: Arc<dyn LlmProvider> = Arc::new(MockProvider::debater());
    let state = two_sided(llm, 6).run("Space exploration is worth it").await.unwrap();
    assert_eq!(state.arguments().len(), 14);
}

#[tokio::test]
async fn test_not_enough_agents() {
    let orchestrator = DebateOrchestrator::new(
        Arc::new(MockProvider::debater()),
        OrchestratorConfig::default(),
    );
    assert!(matches!(
        orchestrator.run("Nobody here").await,
        Err(RuntimeError::NotEnoughAgents(0))
    ));
}

#[tokio::test]
async fn test_state_serializes() {
    let state = two_sided(Arc::new(MockProvider::debater()), 7)
        .run("Remote work should be the default")
        .await
        .unwrap();
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["arguments"].as_array().unwrap().len(), 14);
    assert_eq!(json["phase"], "concluded");
}
