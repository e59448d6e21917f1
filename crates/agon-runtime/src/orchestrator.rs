//! Orchestrator - runs a phase-based debate from opening to verdict

use std::collections::BTreeMap;
use std::sync::Arc;

use agon_core::{ArgumentAnalyzer, DebatePhase, DebateState, PerformanceSummary, Position};
use agon_llm::LlmProvider;

use crate::agent::{AgentConfig, DebateAgent};
use crate::audience::AudienceSimulator;
use crate::error::RuntimeError;

/// Configuration for the orchestrator
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Seed for the audience simulation; random when unset
    pub seed: Option<u64>,
    /// Applied to every debater
    pub agent: AgentConfig,
    /// Scoring engine shared by every debater
    pub analyzer: ArgumentAnalyzer,
}

/// A debater waiting for the next run
#[derive(Debug, Clone)]
struct Seat {
    name: String,
    position: Position,
}

/// Orchestrator schedules turns, feeds the audience and picks the winner
pub struct DebateOrchestrator<L: LlmProvider + ?Sized> {
    /// Configuration
    pub config: OrchestratorConfig,
    llm: Arc<L>,
    seats: Vec<Seat>,
}

impl<L: LlmProvider + ?Sized> DebateOrchestrator<L> {
    /// Create a new orchestrator
    pub fn new(llm: Arc<L>, config: OrchestratorConfig) -> Self {
        Self {
            config,
            llm,
            seats: Vec::new(),
        }
    }

    /// Register a debater; turn order follows registration order
    pub fn add_agent(&mut self, name: &str, position: Position) -> Result<(), RuntimeError> {
        if self.seats.iter().any(|s| s.name == name) {
            return Err(RuntimeError::DuplicateAgent(name.to_string()));
        }
        self.seats.push(Seat {
            name: name.to_string(),
            position,
        });
        Ok(())
    }

    /// Builder form of [`add_agent`](Self::add_agent)
    pub fn with_agent(mut self, name: &str, position: Position) -> Result<Self, RuntimeError> {
        self.add_agent(name, position)?;
        Ok(self)
    }

    pub fn agent_names(&self) -> Vec<&str> {
        self.seats.iter().map(|s| s.name.as_str()).collect()
    }

    /// Run one complete debate on `topic`.
    ///
    /// Every phase plays its full turn budget even if every generation call
    /// fails, so a concluded state with a winner always comes back.
    pub async fn run(&self, topic: &str) -> Result<DebateState, RuntimeError> {
        if self.seats.len() < 2 {
            return Err(RuntimeError::NotEnoughAgents(self.seats.len()));
        }

        let mut agents: Vec<DebateAgent<L>> = self
            .seats
            .iter()
            .map(|s| {
                DebateAgent::new(&s.name, s.position, self.llm.clone(), self.config.agent.clone())
                    .with_analyzer(self.config.analyzer.clone())
            })
            .collect();
        let mut audience = AudienceSimulator::new(self.config.seed);
        let names = self.seats.iter().map(|s| s.name.clone()).collect();
        let mut state = DebateState::new(topic, names);

        tracing::info!(
            debate = %state.id(),
            topic = %topic,
            agents = ?self.agent_names(),
            provider = self.llm.name(),
            "Debate started"
        );

        let n = agents.len() as u32;
        let mut phase = DebatePhase::Opening;
        while phase != DebatePhase::Concluded {
            state.enter_phase(phase)?;
            tracing::info!(
                debate = %state.id(),
                phase = ?phase,
                turns = phase.turn_budget(),
                "Phase started"
            );

            for turn in 0..phase.turn_budget() {
                let Some(argument_type) = phase.argument_type_for_round(turn / n) else {
                    break;
                };
                let agent = &mut agents[(turn % n) as usize];
                let argument = agent.generate_argument(&state, argument_type).await;
                let votes = audience.react(&argument.metrics);

                tracing::info!(
                    debate = %state.id(),
                    turn = state.current_turn() + 1,
                    agent = %argument.agent,
                    argument_type = argument_type.label(),
                    strategy = %agent.strategy(),
                    persuasiveness = argument.metrics.persuasiveness,
                    audience = votes,
                    "Turn complete"
                );

                let name = argument.agent.clone();
                state.record_argument(argument)?;
                state.add_audience_votes(&name, votes)?;
            }
            phase = phase.next();
        }

        let performance = final_performance(&state);
        let winner = pick_winner(&performance)
            .ok_or(RuntimeError::NotEnoughAgents(state.agents().len()))?;
        state.conclude(&winner, performance)?;

        tracing::info!(
            debate = %state.id(),
            winner = %winner,
            arguments = state.arguments().len(),
            "Debate concluded"
        );
        Ok(state)
    }
}

/// Per-agent summary of the finished debate
fn final_performance(state: &DebateState) -> BTreeMap<String, PerformanceSummary> {
    let max_votes = state.audience_tally().values().copied().max().unwrap_or(0);
    state
        .agents()
        .iter()
        .map(|agent| {
            let summary = PerformanceSummary::compute(
                state.arguments_by(agent),
                state.audience_votes(agent),
                max_votes,
            );
            (agent.clone(), summary)
        })
        .collect()
}

/// Highest overall score; exact ties go to the alphabetically first name
fn pick_winner(performance: &BTreeMap<String, PerformanceSummary>) -> Option<String> {
    let mut best: Option<(&String, f64)> = None;
    // BTreeMap iterates names in order, so only a strictly higher score displaces
    for (name, summary) in performance {
        match best {
            Some((_, score)) if summary.overall <= score => {}
            _ => best = Some((name, summary.overall)),
        }
    }
    best.map(|(name, _)| name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agon_llm::MockProvider;

    fn summary(overall: f64) -> PerformanceSummary {
        PerformanceSummary {
            overall,
            ..Default::default()
        }
    }

    #[test]
    fn test_pick_winner_highest_overall() {
        let performance = BTreeMap::from([
            ("alice".to_string(), summary(0.4)),
            ("bob".to_string(), summary(0.6)),
            ("carol".to_string(), summary(0.5)),
        ]);
        assert_eq!(pick_winner(&performance).as_deref(), Some("bob"));
    }

    #[test]
    fn test_pick_winner_tie_goes_to_first_name() {
        let performance = BTreeMap::from([
            ("zed".to_string(), summary(0.5)),
            ("amy".to_string(), summary(0.5)),
        ]);
        assert_eq!(pick_winner(&performance).as_deref(), Some("amy"));
        assert_eq!(pick_winner(&BTreeMap::new()), None);
    }

    #[tokio::test]
    async fn test_duplicate_agent_rejected() {
        let mut orchestrator =
            DebateOrchestrator::new(Arc::new(MockProvider::debater()), OrchestratorConfig::default());
        orchestrator.add_agent("pro", Position::For).unwrap();
        assert!(matches!(
            orchestrator.add_agent("pro", Position::Against),
            Err(RuntimeError::DuplicateAgent(name)) if name == "pro"
        ));
    }

    #[tokio::test]
    async fn test_single_agent_cannot_debate() {
        let orchestrator =
            DebateOrchestrator::new(Arc::new(MockProvider::debater()), OrchestratorConfig::default())
                .with_agent("solo", Position::For)
                .unwrap();
        assert!(matches!(
            orchestrator.run("Anything").await,
            Err(RuntimeError::NotEnoughAgents(1))
        ));
    }
}
