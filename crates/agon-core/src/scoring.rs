//! Lexical argument scoring
//!
//! [`ArgumentAnalyzer::analyze`] turns an argument's text plus the recent debate
//! history into an [`ArgumentMetrics`] vector. Every sub-score is a surface
//! heuristic over word lists, counts and overlaps; none of them attempt to
//! understand the argument. The analyzer is a pure function of its inputs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::argument::{ArgumentMetrics, ArgumentType, EnhancedArgument};

/// Score used for relevance and novelty when there is nothing to compare against
pub const NO_CONTEXT_DEFAULT: f64 = 0.8;

const LOGICAL_CONNECTORS: &[&str] = &[
    "therefore",
    "because",
    "since",
    "thus",
    "hence",
    "consequently",
    "as a result",
    "it follows",
    "furthermore",
    "moreover",
    "accordingly",
    "given that",
];

const STRUCTURE_MARKERS: &[&str] = &["premise", "conclusion", "assumption"];

const EVIDENCE_INDICATORS: &[&str] = &[
    "evidence",
    "data",
    "research",
    "study",
    "studies",
    "statistics",
    "survey",
    "according to",
    "report",
    "found",
    "shows",
    "demonstrates",
    "analysis",
    "experiment",
    "percent",
];

const AUTHORITY_MARKERS: &[&str] = &["study", "university", "journal", "published"];

const EMOTIONAL_LEXEMES: &[&str] = &[
    "amazing",
    "terrible",
    "devastating",
    "outrageous",
    "shocking",
    "tragic",
    "horrible",
    "wonderful",
    "incredible",
    "disaster",
    "catastrophe",
    "fear",
    "hope",
    "love",
    "hate",
    "heartbreaking",
    "inspiring",
    "dangerous",
    "unacceptable",
    "crisis",
];

const HEDGING_WORDS: &[&str] = &[
    "may",
    "might",
    "could",
    "possibly",
    "perhaps",
    "likely",
    "suggests",
    "appears",
    "seems",
    "generally",
    "often",
    "typically",
    "approximately",
    "arguably",
];

const ABSOLUTE_WORDS: &[&str] = &[
    "always",
    "never",
    "all",
    "none",
    "every",
    "definitely",
    "certainly",
    "absolutely",
    "undeniably",
    "proven",
    "guaranteed",
    "impossible",
    "everyone",
    "nobody",
];

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}]+)?").expect("word pattern compiles"));

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)*%?").expect("number pattern compiles"));

static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+").expect("sentence pattern compiles"));

/// How readability is estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadabilityModel {
    /// Flesch reading ease normalized to `[0, 1]`
    #[default]
    FleschReadingEase,
    /// `clamp(1 - (avg_words_per_sentence - 15) / 20, 0, 1)`
    SentenceLength,
}

/// Tunables for the analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub readability: ReadabilityModel,
    /// How many prior arguments relevance is measured against
    pub relevance_window: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            readability: ReadabilityModel::FleschReadingEase,
            relevance_window: 3,
        }
    }
}

/// Who is speaking and what kind of argument is being scored
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// Speaking agent; arguments by anyone else count as opposing
    pub agent: String,
    pub argument_type: ArgumentType,
}

impl AnalysisContext {
    pub fn new(agent: &str, argument_type: ArgumentType) -> Self {
        Self {
            agent: agent.to_string(),
            argument_type,
        }
    }
}

/// Tokenized view of one argument, shared by the sub-scores
struct Text<'a> {
    raw: &'a str,
    /// Lowercase words in order
    words: Vec<String>,
    /// Lowercase words joined by single spaces and padded, for phrase lookups
    padded: String,
}

impl<'a> Text<'a> {
    fn new(raw: &'a str) -> Self {
        let words = words(raw);
        let padded = format!(" {} ", words.join(" "));
        Self { raw, words, padded }
    }

    fn has(&self, lexeme: &str) -> bool {
        self.padded.contains(&format!(" {} ", lexeme))
    }

    /// Number of distinct lexemes from `list` present in the text
    fn distinct_hits(&self, list: &[&str]) -> usize {
        list.iter().filter(|l| self.has(l)).count()
    }

    /// Number of word occurrences that appear in `list`
    fn occurrences(&self, list: &[&str]) -> usize {
        self.words.iter().filter(|w| list.contains(&w.as_str())).count()
    }
}

fn words(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

fn word_set(text: &str) -> HashSet<String> {
    words(text).into_iter().collect()
}

/// Shared distinct words divided by the size of the larger word set
pub fn lexical_overlap(a: &str, b: &str) -> f64 {
    overlap(&word_set(a), &word_set(b))
}

fn overlap(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / larger as f64
}

/// The argument scoring engine
#[derive(Debug, Clone, Default)]
pub struct ArgumentAnalyzer {
    pub config: ScoringConfig,
}

impl ArgumentAnalyzer {
    const LOGIC_WEIGHT: f64 = 0.25;
    const EVIDENCE_WEIGHT: f64 = 0.25;
    const RELEVANCE_WEIGHT: f64 = 0.15;
    const READABILITY_WEIGHT: f64 = 0.15;
    const FACT_CHECK_WEIGHT: f64 = 0.10;
    const NOVELTY_WEIGHT: f64 = 0.10;

    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score one argument against the debate history that preceded it
    pub fn analyze(
        &self,
        text: &str,
        context: &AnalysisContext,
        history: &[EnhancedArgument],
    ) -> ArgumentMetrics {
        let parsed = Text::new(text);
        let own_words: HashSet<String> = parsed.words.iter().cloned().collect();

        let mut metrics = ArgumentMetrics {
            logical_coherence: self.logical_coherence(&parsed),
            evidence_quality: self.evidence_quality(&parsed),
            relevance: self.relevance(&own_words, history),
            emotional_appeal: self.emotional_appeal(&parsed),
            readability: self.readability(&parsed),
            fact_check: self.fact_check(&parsed),
            novelty: self.novelty(&own_words, &context.agent, history),
            persuasiveness: 0.0,
        }
        .clamped();

        metrics.persuasiveness = (Self::LOGIC_WEIGHT * metrics.logical_coherence
            + Self::EVIDENCE_WEIGHT * metrics.evidence_quality
            + Self::RELEVANCE_WEIGHT * metrics.relevance
            + Self::READABILITY_WEIGHT * metrics.readability
            + Self::FACT_CHECK_WEIGHT * metrics.fact_check
            + Self::NOVELTY_WEIGHT * metrics.novelty)
            .min(1.0);

        metrics.clamped()
    }

    fn logical_coherence(&self, text: &Text<'_>) -> f64 {
        let mut score = 0.5;
        score += 0.1 * text.distinct_hits(LOGICAL_CONNECTORS).min(3) as f64;

        let first = text.has("first") || text.has("firstly");
        let second = text.has("second") || text.has("secondly");
        if first && second {
            score += 0.1;
        }

        let structured = text.words.iter().any(|w| {
            STRUCTURE_MARKERS
                .iter()
                .any(|m| w == m || w.strip_suffix('s') == Some(m))
        });
        if structured {
            score += 0.1;
        }

        score.min(1.0)
    }

    fn evidence_quality(&self, text: &Text<'_>) -> f64 {
        let mut score = 0.3;
        score += (0.1 * text.distinct_hits(EVIDENCE_INDICATORS) as f64).min(0.4);
        score += (0.05 * NUMBER_RE.find_iter(text.raw).count() as f64).min(0.2);
        if text.distinct_hits(AUTHORITY_MARKERS) > 0 {
            score += 0.1;
        }
        score.min(1.0)
    }

    fn relevance(&self, own: &HashSet<String>, history: &[EnhancedArgument]) -> f64 {
        if history.is_empty() {
            return NO_CONTEXT_DEFAULT;
        }
        let start = history.len().saturating_sub(self.config.relevance_window.max(1));
        history[start..]
            .iter()
            .map(|prior| overlap(own, &word_set(&prior.content)))
            .fold(0.0, f64::max)
    }

    fn emotional_appeal(&self, text: &Text<'_>) -> f64 {
        let lexemes = text.occurrences(EMOTIONAL_LEXEMES) as f64;
        let exclamations = text.raw.matches('!').count() as f64;
        let shouted = text
            .raw
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| {
                w.chars().count() > 2
                    && w.chars().any(char::is_alphabetic)
                    && w.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
            })
            .count() as f64;

        (0.1 * lexemes + 0.05 * exclamations + 0.05 * shouted).min(1.0)
    }

    fn readability(&self, text: &Text<'_>) -> f64 {
        let sentences = SENTENCE_RE
            .find_iter(text.raw)
            .filter(|s| !s.as_str().trim().is_empty())
            .count()
            .max(1) as f64;
        let word_count = text.words.len() as f64;
        let avg_sentence = word_count / sentences;

        match self.config.readability {
            ReadabilityModel::FleschReadingEase if word_count > 0.0 => {
                let syllables: usize = text.words.iter().map(|w| syllables(w)).sum();
                let ease = 206.835 - 1.015 * avg_sentence - 84.6 * (syllables as f64 / word_count);
                (ease / 100.0).clamp(0.0, 1.0)
            }
            _ => (1.0 - (avg_sentence - 15.0) / 20.0).clamp(0.0, 1.0),
        }
    }

    fn fact_check(&self, text: &Text<'_>) -> f64 {
        let hedges = text.occurrences(HEDGING_WORDS);
        let absolutes = text.occurrences(ABSOLUTE_WORDS);
        match hedges.cmp(&absolutes) {
            std::cmp::Ordering::Greater => 0.7,
            std::cmp::Ordering::Less => 0.4,
            std::cmp::Ordering::Equal => 0.6,
        }
    }

    fn novelty(&self, own: &HashSet<String>, agent: &str, history: &[EnhancedArgument]) -> f64 {
        let overlaps: Vec<f64> = history
            .iter()
            .filter(|prior| prior.agent != agent)
            .map(|prior| overlap(own, &word_set(&prior.content)))
            .collect();

        if overlaps.is_empty() {
            return NO_CONTEXT_DEFAULT;
        }
        let mean = overlaps.iter().sum::<f64>() / overlaps.len() as f64;
        (1.0 - mean).max(0.0)
    }
}

/// Vowel-group syllable estimate, at least one per word
fn syllables(word: &str) -> usize {
    let mut count = 0;
    let mut previous_vowel = false;
    for c in word.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }
    if count > 1 && word.ends_with('e') && !word.ends_with("le") {
        count -= 1;
    }
    count.max(1)
}
