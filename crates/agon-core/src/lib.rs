//! # Agon Core
//!
//! Core types for structured adversarial debates:
//! - [`EnhancedArgument`] - One scored argument produced during a debate
//! - [`ArgumentMetrics`] - Eight independent quality scores in `[0.0, 1.0]`
//! - [`DebatePhase`] - The fixed, forward-only phase sequence
//! - [`DebateState`] - Everything a debate run has produced so far
//! - [`ArgumentAnalyzer`] - The lexical scoring engine
//!
//! ## Scoring an argument
//!
//! ```rust
//! use agon_core::{AnalysisContext, ArgumentAnalyzer, ArgumentType};
//!
//! let analyzer = ArgumentAnalyzer::default();
//! let metrics = analyzer.analyze(
//!     "Because the study published in a journal found 42% gains, we should act.",
//!     &AnalysisContext::new("alice", ArgumentType::Claim),
//!     &[],
//! );
//!
//! assert_eq!(metrics.relevance, 0.8);
//! assert!(metrics.evidence_quality > 0.3);
//! ```

pub mod argument;
pub mod error;
pub mod phase;
pub mod scoring;
pub mod state;

pub use argument::{ArgumentMetrics, ArgumentType, EnhancedArgument, Metric, Position};
pub use error::CoreError;
pub use phase::DebatePhase;
pub use scoring::{lexical_overlap, AnalysisContext, ArgumentAnalyzer, ReadabilityModel, ScoringConfig};
pub use state::{DebateState, PerformanceSummary};
