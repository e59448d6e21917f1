//! Debate state
//!
//! A [`DebateState`] is created once per debate run, mutated only by the
//! orchestrator that owns it, and becomes read-only once concluded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::argument::EnhancedArgument;
use crate::error::CoreError;
use crate::phase::DebatePhase;

/// Final per-agent score breakdown
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Mean logical coherence
    pub logical_coherence: f64,
    /// Mean evidence quality
    pub evidence_quality: f64,
    /// Mean persuasiveness
    pub persuasiveness: f64,
    /// `max(0, 1 - variance(persuasiveness))`
    pub consistency: f64,
    /// Audience votes relative to the best-received agent
    pub audience_share: f64,
    /// Weighted overall score used to pick the winner
    pub overall: f64,
    pub argument_count: usize,
    pub audience_votes: u32,
}

impl PerformanceSummary {
    const LOGIC_WEIGHT: f64 = 0.25;
    const EVIDENCE_WEIGHT: f64 = 0.25;
    const PERSUASION_WEIGHT: f64 = 0.25;
    const CONSISTENCY_WEIGHT: f64 = 0.15;
    const AUDIENCE_WEIGHT: f64 = 0.10;

    /// Summarize one agent's arguments.
    ///
    /// `max_votes` is the highest audience tally among all agents; a zero
    /// maximum yields a zero audience share.
    pub fn compute<'a, I>(arguments: I, audience_votes: u32, max_votes: u32) -> Self
    where
        I: IntoIterator<Item = &'a EnhancedArgument>,
    {
        let mut logic = Vec::new();
        let mut evidence = Vec::new();
        let mut persuasion = Vec::new();
        for arg in arguments {
            logic.push(arg.metrics.logical_coherence);
            evidence.push(arg.metrics.evidence_quality);
            persuasion.push(arg.metrics.persuasiveness);
        }

        let logical_coherence = mean(&logic);
        let evidence_quality = mean(&evidence);
        let persuasiveness = mean(&persuasion);
        let consistency = (1.0 - variance(&persuasion)).max(0.0);
        let audience_share = if max_votes > 0 {
            f64::from(audience_votes) / f64::from(max_votes)
        } else {
            0.0
        };

        let overall = Self::LOGIC_WEIGHT * logical_coherence
            + Self::EVIDENCE_WEIGHT * evidence_quality
            + Self::PERSUASION_WEIGHT * persuasiveness
            + Self::CONSISTENCY_WEIGHT * consistency
            + Self::AUDIENCE_WEIGHT * audience_share;

        Self {
            logical_coherence,
            evidence_quality,
            persuasiveness,
            consistency,
            audience_share,
            overall,
            argument_count: persuasion.len(),
            audience_votes,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; zero for fewer than two samples
fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Everything a debate run has produced so far
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateState {
    id: Uuid,
    topic: String,
    agents: Vec<String>,
    arguments: Vec<EnhancedArgument>,
    current_turn: u32,
    max_turns: u32,
    phase: DebatePhase,
    winner: Option<String>,
    audience_votes: BTreeMap<String, u32>,
    performance: BTreeMap<String, PerformanceSummary>,
    started_at: DateTime<Utc>,
    concluded_at: Option<DateTime<Utc>>,
}

impl DebateState {
    /// Create a fresh debate in the opening phase
    pub fn new(topic: &str, agents: Vec<String>) -> Self {
        let audience_votes = agents.iter().map(|a| (a.clone(), 0)).collect();
        Self {
            id: Uuid::new_v4(),
            topic: topic.to_string(),
            agents,
            arguments: Vec::new(),
            current_turn: 0,
            max_turns: DebatePhase::total_turns(),
            phase: DebatePhase::Opening,
            winner: None,
            audience_votes,
            performance: BTreeMap::new(),
            started_at: Utc::now(),
            concluded_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Participating agents in registration order
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    /// Every argument in the order it was produced
    pub fn arguments(&self) -> &[EnhancedArgument] {
        &self.arguments
    }

    /// The last `n` arguments (fewer if the debate is younger)
    pub fn recent_arguments(&self, n: usize) -> &[EnhancedArgument] {
        let start = self.arguments.len().saturating_sub(n);
        &self.arguments[start..]
    }

    pub fn arguments_by<'a>(&'a self, agent: &'a str) -> impl Iterator<Item = &'a EnhancedArgument> + 'a {
        self.arguments.iter().filter(move |a| a.agent == agent)
    }

    pub fn last_argument(&self) -> Option<&EnhancedArgument> {
        self.arguments.last()
    }

    /// Number of turns taken so far
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    pub fn phase(&self) -> DebatePhase {
        self.phase
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn is_concluded(&self) -> bool {
        self.phase == DebatePhase::Concluded
    }

    /// Audience votes accumulated by one agent
    pub fn audience_votes(&self, agent: &str) -> u32 {
        self.audience_votes.get(agent).copied().unwrap_or(0)
    }

    pub fn audience_tally(&self) -> &BTreeMap<String, u32> {
        &self.audience_votes
    }

    /// Final score breakdown (empty until concluded)
    pub fn performance(&self) -> &BTreeMap<String, PerformanceSummary> {
        &self.performance
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn concluded_at(&self) -> Option<DateTime<Utc>> {
        self.concluded_at
    }

    /// Agents ordered by overall score, best first
    pub fn standings(&self) -> Vec<(&str, &PerformanceSummary)> {
        let mut rows: Vec<_> = self
            .performance
            .iter()
            .map(|(name, summary)| (name.as_str(), summary))
            .collect();
        rows.sort_by(|a, b| b.1.overall.total_cmp(&a.1.overall).then_with(|| a.0.cmp(b.0)));
        rows
    }

    fn ensure_open(&self) -> Result<(), CoreError> {
        if self.is_concluded() {
            return Err(CoreError::DebateConcluded);
        }
        Ok(())
    }

    fn ensure_agent(&self, agent: &str) -> Result<(), CoreError> {
        if !self.agents.iter().any(|a| a == agent) {
            return Err(CoreError::UnknownAgent(agent.to_string()));
        }
        Ok(())
    }

    /// Append an argument and count the turn
    pub fn record_argument(&mut self, argument: EnhancedArgument) -> Result<(), CoreError> {
        self.ensure_open()?;
        self.ensure_agent(&argument.agent)?;
        self.arguments.push(argument);
        self.current_turn += 1;
        Ok(())
    }

    /// Add audience votes to an agent's tally, returning the new total
    pub fn add_audience_votes(&mut self, agent: &str, votes: u32) -> Result<u32, CoreError> {
        self.ensure_open()?;
        self.ensure_agent(agent)?;
        let tally = self.audience_votes.entry(agent.to_string()).or_insert(0);
        *tally = tally.saturating_add(votes);
        Ok(*tally)
    }

    /// Move to a later active phase.
    ///
    /// Re-entering the current phase is a no-op; moving backward is rejected.
    pub fn enter_phase(&mut self, phase: DebatePhase) -> Result<(), CoreError> {
        self.ensure_open()?;
        if phase == DebatePhase::Concluded {
            return Err(CoreError::ConclusionRequired);
        }
        if phase < self.phase {
            return Err(CoreError::PhaseRegression {
                from: self.phase,
                to: phase,
            });
        }
        self.phase = phase;
        Ok(())
    }

    /// Declare the winner, store the final breakdown and freeze the state
    pub fn conclude(
        &mut self,
        winner: &str,
        performance: BTreeMap<String, PerformanceSummary>,
    ) -> Result<(), CoreError> {
        self.ensure_open()?;
        self.ensure_agent(winner)?;
        self.winner = Some(winner.to_string());
        self.performance = performance;
        self.phase = DebatePhase::Concluded;
        self.concluded_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::{ArgumentMetrics, ArgumentType, Position};

    fn argument(agent: &str, persuasiveness: f64) -> EnhancedArgument {
        EnhancedArgument::new(
            agent,
            Position::For,
            "text",
            ArgumentType::Claim,
            DebatePhase::MainArguments,
            ArgumentMetrics {
                logical_coherence: 0.5,
                evidence_quality: 0.4,
                persuasiveness,
                ..Default::default()
            },
        )
    }

    fn two_agents() -> DebateState {
        DebateState::new("Cities should ban cars", vec!["alice".into(), "bob".into()])
    }

    #[test]
    fn test_new_state() {
        let state = two_agents();
        assert_eq!(state.phase(), DebatePhase::Opening);
        assert_eq!(state.max_turns(), 14);
        assert_eq!(state.audience_votes("alice"), 0);
        assert!(state.winner().is_none());
    }

    #[test]
    fn test_record_argument_counts_turns() {
        let mut state = two_agents();
        state.record_argument(argument("alice", 0.5)).unwrap();
        state.record_argument(argument("bob", 0.6)).unwrap();

        assert_eq!(state.current_turn(), 2);
        assert_eq!(state.arguments_by("alice").count(), 1);
        assert_eq!(state.recent_arguments(5).len(), 2);
        assert_eq!(state.last_argument().unwrap().agent, "bob");
    }

    #[test]
    fn test_unknown_agent_rejected() {
        let mut state = two_agents();
        let err = state.record_argument(argument("carol", 0.5)).unwrap_err();
        assert_eq!(err, CoreError::UnknownAgent("carol".into()));
    }

    #[test]
    fn test_phase_never_regresses() {
        let mut state = two_agents();
        state.enter_phase(DebatePhase::Rebuttals).unwrap();
        let err = state.enter_phase(DebatePhase::MainArguments).unwrap_err();
        assert!(matches!(err, CoreError::PhaseRegression { .. }));
        assert_eq!(
            state.enter_phase(DebatePhase::Concluded),
            Err(CoreError::ConclusionRequired)
        );
    }

    #[test]
    fn test_concluded_state_is_read_only() {
        let mut state = two_agents();
        state.conclude("alice", BTreeMap::new()).unwrap();

        assert!(state.is_concluded());
        assert_eq!(state.winner(), Some("alice"));
        assert_eq!(
            state.record_argument(argument("bob", 0.5)),
            Err(CoreError::DebateConcluded)
        );
        assert_eq!(
            state.add_audience_votes("bob", 3),
            Err(CoreError::DebateConcluded)
        );
    }

    #[test]
    fn test_performance_summary() {
        let args = [argument("alice", 0.4), argument("alice", 0.6)];
        let summary = PerformanceSummary::compute(args.iter(), 5, 10);

        assert!((summary.persuasiveness - 0.5).abs() < 1e-9);
        // variance of [0.4, 0.6] is 0.01
        assert!((summary.consistency - 0.99).abs() < 1e-9);
        assert!((summary.audience_share - 0.5).abs() < 1e-9);
        let expected = 0.25 * 0.5 + 0.25 * 0.4 + 0.25 * 0.5 + 0.15 * 0.99 + 0.10 * 0.5;
        assert!((summary.overall - expected).abs() < 1e-9);
        assert_eq!(summary.argument_count, 2);
    }

    #[test]
    fn test_single_argument_is_fully_consistent() {
        let args = [argument("alice", 0.9)];
        let summary = PerformanceSummary::compute(args.iter(), 0, 0);
        assert_eq!(summary.consistency, 1.0);
        assert_eq!(summary.audience_share, 0.0);
    }
}
