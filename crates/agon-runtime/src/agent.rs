//! Debating agents
//!
//! A [`DebateAgent`] owns everything it learns during one debate: its own
//! arguments, a profile of every opponent and its running scores. Nothing is
//! shared between agents; the orchestrator hands each agent a read-only view
//! of the [`DebateState`] when it is that agent's turn.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use agon_core::{
    AnalysisContext, ArgumentAnalyzer, ArgumentMetrics, ArgumentType, DebatePhase, DebateState,
    EnhancedArgument, Metric, Position,
};
use agon_llm::{generate, Generation, LlmProvider, LlmRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persuasiveness assigned to every fallback argument.
///
/// Other components read this exact value as the marker of fallback mode.
pub const FALLBACK_PERSUASIVENESS: f64 = 0.3;

/// Average persuasiveness above which an opponent is considered a threat
const THREAT_THRESHOLD: f64 = 0.7;

/// Turns played before an agent starts adapting
const WARMUP_TURNS: u32 = 3;

/// Metrics an opponent can be weakest in
const ATTACKABLE: [Metric; 4] = [
    Metric::LogicalCoherence,
    Metric::EvidenceQuality,
    Metric::FactCheck,
    Metric::Novelty,
];

/// Configuration for a debating agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Upper bound on one generation call
    pub generation_timeout: Duration,
    /// Number of recent arguments shown in the prompt
    pub context_window: usize,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            generation_timeout: Duration::from_secs(30),
            context_window: 5,
            temperature: 0.7,
            max_tokens: 400,
        }
    }
}

/// How an agent currently approaches the debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Balanced,
    Aggressive,
    Defensive,
    EvidenceHeavy,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
            Self::Defensive => "defensive",
            Self::EvidenceHeavy => "evidence_heavy",
        }
    }

    fn instructions(&self) -> &'static str {
        match self {
            Self::Balanced => "Mix reasoning, evidence and appeal in equal measure.",
            Self::Aggressive => {
                "Attack the strongest opposing points directly and expose their weaknesses."
            }
            Self::Defensive => "Shore up your earlier points and answer challenges to them.",
            Self::EvidenceHeavy => "Lead with data, studies and concrete figures.",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dominant rhetorical style of an opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateStyle {
    Emotional,
    EvidenceBased,
    Logical,
}

/// What an agent has worked out about one opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentProfile {
    pub avg_persuasiveness: f64,
    pub style: DebateStyle,
    /// Lowest-scoring attackable metric
    pub weakest: Metric,
    pub argument_count: usize,
}

impl OpponentProfile {
    fn from_arguments(arguments: &[&EnhancedArgument]) -> Option<Self> {
        if arguments.is_empty() {
            return None;
        }
        let avg = |metric: Metric| {
            arguments.iter().map(|a| a.metrics.get(metric)).sum::<f64>() / arguments.len() as f64
        };

        let emotional = avg(Metric::EmotionalAppeal);
        let evidence = avg(Metric::EvidenceQuality);
        let logic = avg(Metric::LogicalCoherence);
        let style = if emotional > evidence && emotional > logic {
            DebateStyle::Emotional
        } else if evidence > logic {
            DebateStyle::EvidenceBased
        } else {
            DebateStyle::Logical
        };

        let mut weakest = ATTACKABLE[0];
        let mut lowest = avg(weakest);
        for metric in &ATTACKABLE[1..] {
            let value = avg(*metric);
            if value < lowest {
                weakest = *metric;
                lowest = value;
            }
        }

        Some(Self {
            avg_persuasiveness: avg(Metric::Persuasiveness),
            style,
            weakest,
            argument_count: arguments.len(),
        })
    }
}

/// Scores an agent has accumulated over its own arguments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceHistory {
    pub persuasiveness: Vec<f64>,
    pub evidence_quality: Vec<f64>,
    pub logical_coherence: Vec<f64>,
}

impl PerformanceHistory {
    fn record(&mut self, metrics: &ArgumentMetrics) {
        self.persuasiveness.push(metrics.persuasiveness);
        self.evidence_quality.push(metrics.evidence_quality);
        self.logical_coherence.push(metrics.logical_coherence);
    }

    pub fn len(&self) -> usize {
        self.persuasiveness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persuasiveness.is_empty()
    }

    pub fn average_persuasiveness(&self) -> f64 {
        average(&self.persuasiveness)
    }

    pub fn average_evidence_quality(&self) -> f64 {
        average(&self.evidence_quality)
    }

    pub fn average_logical_coherence(&self) -> f64 {
        average(&self.logical_coherence)
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// One debater backed by a text-generation provider
#[derive(Debug)]
pub struct DebateAgent<L: LlmProvider + ?Sized> {
    name: String,
    position: Position,
    llm: Arc<L>,
    config: AgentConfig,
    analyzer: ArgumentAnalyzer,
    strategy: Strategy,
    memory: Vec<EnhancedArgument>,
    opponents: BTreeMap<String, OpponentProfile>,
    history: PerformanceHistory,
    fallbacks: usize,
}

impl<L: LlmProvider + ?Sized> DebateAgent<L> {
    pub fn new(name: &str, position: Position, llm: Arc<L>, config: AgentConfig) -> Self {
        Self {
            name: name.to_string(),
            position,
            llm,
            config,
            analyzer: ArgumentAnalyzer::default(),
            strategy: Strategy::Balanced,
            memory: Vec::new(),
            opponents: BTreeMap::new(),
            history: PerformanceHistory::default(),
            fallbacks: 0,
        }
    }

    /// Score with a non-default analyzer
    pub fn with_analyzer(mut self, analyzer: ArgumentAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Every argument this agent has produced, oldest first
    pub fn memory(&self) -> &[EnhancedArgument] {
        &self.memory
    }

    pub fn opponent_analysis(&self) -> &BTreeMap<String, OpponentProfile> {
        &self.opponents
    }

    pub fn performance_history(&self) -> &PerformanceHistory {
        &self.history
    }

    /// Number of arguments produced without the provider
    pub fn fallback_count(&self) -> usize {
        self.fallbacks
    }

    /// Produce this agent's next argument.
    ///
    /// Always returns an argument: when the provider fails or times out the
    /// agent restates its position and the result is tagged with
    /// [`FALLBACK_PERSUASIVENESS`].
    pub async fn generate_argument(
        &mut self,
        state: &DebateState,
        argument_type: ArgumentType,
    ) -> EnhancedArgument {
        self.analyze_opponents(state);
        self.adapt_strategy(state);

        let window = state.recent_arguments(self.config.context_window);
        let system = self.system_instruction(state);
        let prompt = self.prompt(state, window, argument_type);
        let request = LlmRequest::with_role(&system, &prompt)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens);

        let (content, fallback) =
            match generate(self.llm.as_ref(), request, self.config.generation_timeout).await {
                Generation::Generated(text) => (text, false),
                Generation::TimedOut => {
                    tracing::warn!(
                        agent = %self.name,
                        reason = "timeout",
                        "Falling back to restated position"
                    );
                    (self.fallback_text(state, argument_type), true)
                }
                Generation::Failed(reason) => {
                    tracing::warn!(
                        agent = %self.name,
                        reason = %reason,
                        "Falling back to restated position"
                    );
                    (self.fallback_text(state, argument_type), true)
                }
            };

        let context = AnalysisContext::new(&self.name, argument_type);
        let mut metrics = self.analyzer.analyze(&content, &context, state.arguments());
        if fallback {
            metrics.persuasiveness = FALLBACK_PERSUASIVENESS;
            self.fallbacks += 1;
        }

        let references = if argument_type.is_responsive() {
            self.latest_opposing(window)
        } else {
            Vec::new()
        };

        let argument = EnhancedArgument::new(
            &self.name,
            self.position,
            &content,
            argument_type,
            state.phase(),
            metrics,
        )
        .with_references(references);

        self.history.record(&argument.metrics);
        self.memory.push(argument.clone());
        argument
    }

    /// Rebuild opponent profiles from the full argument history
    fn analyze_opponents(&mut self, state: &DebateState) {
        self.opponents.clear();
        for opponent in state.agents().iter().filter(|a| **a != self.name) {
            let arguments: Vec<&EnhancedArgument> = state.arguments_by(opponent).collect();
            if let Some(profile) = OpponentProfile::from_arguments(&arguments) {
                self.opponents.insert(opponent.clone(), profile);
            }
        }
    }

    fn adapt_strategy(&mut self, state: &DebateState) {
        let next = if state.current_turn() < WARMUP_TURNS {
            Strategy::Balanced
        } else if self
            .opponents
            .values()
            .any(|p| p.avg_persuasiveness > THREAT_THRESHOLD)
        {
            Strategy::Aggressive
        } else if state.phase() == DebatePhase::Rebuttals {
            Strategy::Defensive
        } else {
            Strategy::EvidenceHeavy
        };

        if next != self.strategy {
            tracing::info!(
                agent = %self.name,
                from = %self.strategy,
                to = %next,
                turn = state.current_turn(),
                "Strategy changed"
            );
            self.strategy = next;
        }
    }

    fn system_instruction(&self, state: &DebateState) -> String {
        format!(
            "You are {}, a debater arguing {} the motion \"{}\". Strategy: {}. {}",
            self.name,
            self.position,
            state.topic(),
            self.strategy,
            self.strategy.instructions()
        )
    }

    fn prompt(
        &self,
        state: &DebateState,
        window: &[EnhancedArgument],
        argument_type: ArgumentType,
    ) -> String {
        let mut prompt = format!(
            "Motion: {}\nPosition: {}\nPhase: {}\n",
            state.topic(),
            self.position.as_str().to_uppercase(),
            state.phase().label()
        );

        if let Some(weak) = self.weakest_opponent_metric() {
            prompt.push_str(&format!(
                "Your opponents are weakest on {}.\n",
                weak.name().replace('_', " ")
            ));
        }

        if window.is_empty() {
            prompt.push_str("No arguments have been made yet.\n");
        } else {
            prompt.push_str("Recent arguments:\n");
            for arg in window {
                prompt.push_str(&format!(
                    "- {} ({}, {}): {}\n",
                    arg.agent,
                    arg.position,
                    arg.argument_type.label(),
                    arg.content
                ));
            }
        }

        prompt.push_str(&format!(
            "Write your {} in under 150 words.",
            argument_type.label()
        ));
        prompt
    }

    /// Weakness of the most persuasive opponent
    fn weakest_opponent_metric(&self) -> Option<Metric> {
        self.opponents
            .values()
            .max_by(|a, b| a.avg_persuasiveness.total_cmp(&b.avg_persuasiveness))
            .map(|p| p.weakest)
    }

    fn fallback_text(&self, state: &DebateState, argument_type: ArgumentType) -> String {
        format!(
            "As the side arguing {} the motion \"{}\", I maintain my position in this {}.",
            self.position,
            state.topic(),
            argument_type.label()
        )
    }

    /// Id of the most recent argument from the other side within the context window
    fn latest_opposing(&self, window: &[EnhancedArgument]) -> Vec<Uuid> {
        let other_side = self.position.opposite();
        window
            .iter()
            .rev()
            .find(|a| a.position == other_side)
            .map(|a| vec![a.id])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agon_llm::MockProvider;

    fn scored(agent: &str, position: Position, persuasiveness: f64) -> EnhancedArgument {
        EnhancedArgument::new(
            agent,
            position,
            "Some argument text.",
            ArgumentType::Claim,
            DebatePhase::MainArguments,
            ArgumentMetrics {
                logical_coherence: 0.6,
                evidence_quality: 0.9,
                emotional_appeal: 0.1,
                fact_check: 0.4,
                novelty: 0.7,
                persuasiveness,
                ..Default::default()
            },
        )
    }

    fn state_with(arguments: Vec<EnhancedArgument>) -> DebateState {
        let mut state = DebateState::new("Cities should ban cars", vec!["pro".into(), "con".into()]);
        state.enter_phase(DebatePhase::MainArguments).unwrap();
        for arg in arguments {
            state.record_argument(arg).unwrap();
        }
        state
    }

    fn agent(llm: MockProvider) -> DebateAgent<MockProvider> {
        DebateAgent::new("pro", Position::For, Arc::new(llm), AgentConfig::default())
    }

    #[tokio::test]
    async fn test_generated_argument_is_scored_and_remembered() {
        let mut pro = agent(MockProvider::debater());
        let state = state_with(vec![]);

        let arg = pro.generate_argument(&state, ArgumentType::Evidence).await;
        assert_eq!(arg.agent, "pro");
        assert_eq!(arg.phase, DebatePhase::MainArguments);
        assert!(arg.content.contains("study"));
        assert_eq!(arg.metrics.relevance, 0.8);
        assert_eq!(pro.memory().len(), 1);
        assert_eq!(pro.performance_history().len(), 1);
        assert_eq!(pro.fallback_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_falls_back_with_fixed_persuasiveness() {
        let mut pro = agent(MockProvider::offline());
        let state = state_with(vec![]);

        let arg = pro.generate_argument(&state, ArgumentType::Claim).await;
        assert_eq!(arg.metrics.persuasiveness, FALLBACK_PERSUASIVENESS);
        assert!(arg.content.contains("Cities should ban cars"));
        assert!(arg.content.contains("for"));
        assert_eq!(pro.fallback_count(), 1);
        assert_eq!(pro.performance_history().average_persuasiveness(), 0.3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let config = AgentConfig {
            generation_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let llm = Arc::new(MockProvider::constant("too late").with_latency(10_000));
        let mut pro = DebateAgent::new("pro", Position::For, llm, config);

        let arg = pro
            .generate_argument(&state_with(vec![]), ArgumentType::Claim)
            .await;
        assert_eq!(arg.metrics.persuasiveness, FALLBACK_PERSUASIVENESS);
        assert!(!arg.content.contains("too late"));
    }

    #[tokio::test]
    async fn test_empty_completion_falls_back() {
        let mut pro = agent(MockProvider::constant(""));
        let arg = pro
            .generate_argument(&state_with(vec![]), ArgumentType::Claim)
            .await;
        assert_eq!(arg.metrics.persuasiveness, FALLBACK_PERSUASIVENESS);
    }

    #[tokio::test]
    async fn test_balanced_during_warmup() {
        let mut pro = agent(MockProvider::debater());
        let state = state_with(vec![
            scored("pro", Position::For, 0.5),
            scored("con", Position::Against, 0.95),
        ]);
        pro.generate_argument(&state, ArgumentType::Claim).await;
        assert_eq!(pro.strategy(), Strategy::Balanced);
    }

    #[tokio::test]
    async fn test_switches_to_aggressive_against_strong_opponent() {
        let mut pro = agent(MockProvider::debater());
        let state = state_with(vec![
            scored("pro", Position::For, 0.5),
            scored("con", Position::Against, 0.8),
            scored("pro", Position::For, 0.5),
            scored("con", Position::Against, 0.75),
        ]);

        pro.generate_argument(&state, ArgumentType::Claim).await;
        assert_eq!(pro.strategy(), Strategy::Aggressive);

        let profile = &pro.opponent_analysis()["con"];
        assert!((profile.avg_persuasiveness - 0.775).abs() < 1e-9);
        assert_eq!(profile.style, DebateStyle::EvidenceBased);
        assert_eq!(profile.weakest, Metric::FactCheck);
        assert_eq!(profile.argument_count, 2);
    }

    #[tokio::test]
    async fn test_defensive_in_rebuttals_then_evidence_heavy() {
        let mut pro = agent(MockProvider::debater());
        let mut state = state_with(vec![
            scored("pro", Position::For, 0.5),
            scored("con", Position::Against, 0.4),
            scored("pro", Position::For, 0.5),
        ]);

        pro.generate_argument(&state, ArgumentType::Evidence).await;
        assert_eq!(pro.strategy(), Strategy::EvidenceHeavy);

        state.enter_phase(DebatePhase::Rebuttals).unwrap();
        pro.generate_argument(&state, ArgumentType::Rebuttal).await;
        assert_eq!(pro.strategy(), Strategy::Defensive);
    }

    #[tokio::test]
    async fn test_rebuttal_references_latest_opposing_argument() {
        let mut pro = agent(MockProvider::debater());
        let opposing = scored("con", Position::Against, 0.4);
        let opposing_id = opposing.id;
        let mut state = state_with(vec![scored("pro", Position::For, 0.5), opposing]);
        state.enter_phase(DebatePhase::Rebuttals).unwrap();

        let rebuttal = pro.generate_argument(&state, ArgumentType::Rebuttal).await;
        assert_eq!(rebuttal.references, vec![opposing_id]);

        let claim = pro.generate_argument(&state, ArgumentType::Claim).await;
        assert!(claim.references.is_empty());
    }

    #[tokio::test]
    async fn test_rebuttal_skips_teammates() {
        let mut pro = agent(MockProvider::debater());
        let mut state = DebateState::new(
            "Cities should ban cars",
            vec!["pro".into(), "con".into(), "ally".into()],
        );
        state.enter_phase(DebatePhase::Rebuttals).unwrap();
        let opposing = scored("con", Position::Against, 0.4);
        let opposing_id = opposing.id;
        state.record_argument(opposing).unwrap();
        state.record_argument(scored("ally", Position::For, 0.6)).unwrap();

        let rebuttal = pro.generate_argument(&state, ArgumentType::Rebuttal).await;
        assert_eq!(rebuttal.references, vec![opposing_id]);
    }

    #[test]
    fn test_opponent_style_classification() {
        let emotional = EnhancedArgument::new(
            "con",
            Position::Against,
            "text",
            ArgumentType::Claim,
            DebatePhase::MainArguments,
            ArgumentMetrics {
                emotional_appeal: 0.9,
                evidence_quality: 0.3,
                logical_coherence: 0.5,
                fact_check: 0.6,
                novelty: 0.2,
                ..Default::default()
            },
        );
        let profile = OpponentProfile::from_arguments(&[&emotional]).unwrap();
        assert_eq!(profile.style, DebateStyle::Emotional);
        assert_eq!(profile.weakest, Metric::Novelty);

        assert!(OpponentProfile::from_arguments(&[]).is_none());
    }
}
