//! Propositions, formal arguments and the knowledge base that stores them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Prefix that turns a proposition's content into its negation
pub const NEGATION_MARKER: &str = "¬";

/// A statement identified purely by its content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposition {
    pub content: String,
    pub truth_value: Option<bool>,
    /// Confidence (0.0 - 1.0)
    pub confidence: f64,
    pub source: Option<String>,
}

impl Proposition {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            truth_value: None,
            confidence: 1.0,
            source: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_truth_value(mut self, truth_value: bool) -> Self {
        self.truth_value = Some(truth_value);
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Whether the content carries the negation marker
    pub fn is_negation(&self) -> bool {
        self.content.starts_with(NEGATION_MARKER)
    }

    /// The logical negation (`A` becomes `¬A`, `¬A` becomes `A`)
    pub fn negated(&self) -> Proposition {
        match self.content.strip_prefix(NEGATION_MARKER) {
            Some(inner) => Proposition::new(inner),
            None => Proposition::new(&negation_of(&self.content)),
        }
    }
}

/// `content` with the marker prefixed; never strips an existing one
fn negation_of(content: &str) -> String {
    format!("{}{}", NEGATION_MARKER, content)
}

impl PartialEq for Proposition {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl Eq for Proposition {}

impl Hash for Proposition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content.hash(state);
    }
}

/// Premises supporting a conclusion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormalArgument {
    /// Unique ID
    pub id: Uuid,
    pub premises: Vec<Proposition>,
    pub conclusion: Proposition,
    /// Strength (0.0 - 1.0)
    pub strength: f64,
    /// Named argumentation scheme, e.g. "expert opinion"
    pub scheme: Option<String>,
}

impl FormalArgument {
    pub fn new(premises: Vec<Proposition>, conclusion: Proposition) -> Self {
        Self {
            id: Uuid::new_v4(),
            premises,
            conclusion,
            strength: 1.0,
            scheme: None,
        }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength.clamp(0.0, 1.0);
        self
    }

    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = Some(scheme.to_string());
        self
    }

    /// Content key: premises and conclusion, independent of the generated id
    pub fn signature(&self) -> String {
        let premises: Vec<&str> = self.premises.iter().map(|p| p.content.as_str()).collect();
        format!("{} => {}", premises.join(" & "), self.conclusion.content)
    }
}

/// Content-keyed store of propositions and formal arguments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    propositions: BTreeMap<String, Proposition>,
    arguments: BTreeMap<String, FormalArgument>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a proposition, replacing any with the same content
    pub fn add_proposition(&mut self, proposition: Proposition) {
        self.propositions
            .insert(proposition.content.clone(), proposition);
    }

    pub fn remove_proposition(&mut self, content: &str) -> Option<Proposition> {
        self.propositions.remove(content)
    }

    pub fn proposition(&self, content: &str) -> Option<&Proposition> {
        self.propositions.get(content)
    }

    pub fn propositions(&self) -> impl Iterator<Item = &Proposition> {
        self.propositions.values()
    }

    /// Store an argument and register its premises and conclusion.
    ///
    /// An argument with the same premises and conclusion replaces the old one.
    pub fn add_argument(&mut self, argument: FormalArgument) {
        for premise in &argument.premises {
            self.add_proposition(premise.clone());
        }
        self.add_proposition(argument.conclusion.clone());
        self.arguments.insert(argument.signature(), argument);
    }

    pub fn arguments(&self) -> impl Iterator<Item = &FormalArgument> {
        self.arguments.values()
    }

    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    /// Arguments whose conclusion is `proposition`
    pub fn find_supporting_arguments(&self, proposition: &Proposition) -> Vec<&FormalArgument> {
        self.arguments
            .values()
            .filter(|a| a.conclusion.content == proposition.content)
            .collect()
    }

    /// Arguments whose conclusion is the negation of `proposition`
    pub fn find_attacking_arguments(&self, proposition: &Proposition) -> Vec<&FormalArgument> {
        let negation = negation_of(&proposition.content);
        self.arguments
            .values()
            .filter(|a| a.conclusion.content == negation)
            .collect()
    }

    /// Pairs `(P, ¬P)` stored at the same time
    pub fn contradictions(&self) -> Vec<(&Proposition, &Proposition)> {
        self.propositions
            .values()
            .filter_map(|p| {
                self.propositions
                    .get(&negation_of(&p.content))
                    .map(|negated| (p, negated))
            })
            .collect()
    }

    /// True when no proposition is stored alongside its negation
    pub fn is_consistent(&self) -> bool {
        !self
            .propositions
            .keys()
            .any(|content| self.propositions.contains_key(&negation_of(content)))
    }

    /// Membership check only; no inference is performed
    pub fn entails(&self, proposition: &Proposition) -> bool {
        self.propositions.contains_key(&proposition.content)
    }

    pub fn len(&self) -> usize {
        self.propositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.propositions.is_empty() && self.arguments.is_empty()
    }
}
