//! Arguments produced during a phase-based debate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::phase::DebatePhase;

/// Side of the motion an agent argues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    For,
    Against,
}

impl Position {
    /// The opposing side
    pub fn opposite(&self) -> Position {
        match self {
            Self::For => Self::Against,
            Self::Against => Self::For,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::For => "for",
            Self::Against => "against",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "for" | "pro" => Ok(Self::For),
            "against" | "con" => Ok(Self::Against),
            other => Err(format!("unknown position '{}'", other)),
        }
    }
}

/// Kind of argument requested from an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentType {
    OpeningStatement,
    Claim,
    Evidence,
    Rebuttal,
    CounterRebuttal,
    ClosingStatement,
}

impl ArgumentType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpeningStatement => "opening statement",
            Self::Claim => "claim",
            Self::Evidence => "evidence",
            Self::Rebuttal => "rebuttal",
            Self::CounterRebuttal => "counter-rebuttal",
            Self::ClosingStatement => "closing statement",
        }
    }

    /// Whether this argument answers an opponent's earlier arguments
    pub fn is_responsive(&self) -> bool {
        matches!(self, Self::Rebuttal | Self::CounterRebuttal)
    }
}

/// One of the eight scoring dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    LogicalCoherence,
    EvidenceQuality,
    Relevance,
    EmotionalAppeal,
    Readability,
    FactCheck,
    Novelty,
    Persuasiveness,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LogicalCoherence => "logical_coherence",
            Self::EvidenceQuality => "evidence_quality",
            Self::Relevance => "relevance",
            Self::EmotionalAppeal => "emotional_appeal",
            Self::Readability => "readability",
            Self::FactCheck => "fact_check",
            Self::Novelty => "novelty",
            Self::Persuasiveness => "persuasiveness",
        }
    }
}

/// Quality scores for a single argument, every field in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArgumentMetrics {
    pub logical_coherence: f64,
    pub evidence_quality: f64,
    pub relevance: f64,
    pub emotional_appeal: f64,
    pub readability: f64,
    pub fact_check: f64,
    pub novelty: f64,
    /// Weighted combination of the other scores, computed last
    pub persuasiveness: f64,
}

impl ArgumentMetrics {
    /// Read one dimension
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::LogicalCoherence => self.logical_coherence,
            Metric::EvidenceQuality => self.evidence_quality,
            Metric::Relevance => self.relevance,
            Metric::EmotionalAppeal => self.emotional_appeal,
            Metric::Readability => self.readability,
            Metric::FactCheck => self.fact_check,
            Metric::Novelty => self.novelty,
            Metric::Persuasiveness => self.persuasiveness,
        }
    }

    /// Clamp every dimension into `[0.0, 1.0]` (NaN becomes 0.0)
    pub fn clamped(self) -> Self {
        fn unit(v: f64) -> f64 {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, 1.0)
            }
        }

        Self {
            logical_coherence: unit(self.logical_coherence),
            evidence_quality: unit(self.evidence_quality),
            relevance: unit(self.relevance),
            emotional_appeal: unit(self.emotional_appeal),
            readability: unit(self.readability),
            fact_check: unit(self.fact_check),
            novelty: unit(self.novelty),
            persuasiveness: unit(self.persuasiveness),
        }
    }
}

/// A scored argument produced by one agent during one phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedArgument {
    /// Unique ID
    pub id: Uuid,
    /// Name of the agent that produced it
    pub agent: String,
    pub position: Position,
    pub content: String,
    pub argument_type: ArgumentType,
    pub phase: DebatePhase,
    pub timestamp: DateTime<Utc>,
    /// Whitespace-delimited word count of `content`
    pub word_count: usize,
    pub metrics: ArgumentMetrics,
    /// Prior arguments this one responds to
    #[serde(default)]
    pub references: Vec<Uuid>,
}

impl EnhancedArgument {
    /// Create a new argument, deriving its id, timestamp and word count
    pub fn new(
        agent: &str,
        position: Position,
        content: &str,
        argument_type: ArgumentType,
        phase: DebatePhase,
        metrics: ArgumentMetrics,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent: agent.to_string(),
            position,
            content: content.to_string(),
            argument_type,
            phase,
            timestamp: Utc::now(),
            word_count: content.split_whitespace().count(),
            metrics: metrics.clamped(),
            references: Vec::new(),
        }
    }

    /// Attach references to earlier arguments
    pub fn with_references(mut self, references: Vec<Uuid>) -> Self {
        self.references = references;
        self
    }
}
