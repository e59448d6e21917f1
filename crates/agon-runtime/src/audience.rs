//! Audience reaction simulation

use agon_core::ArgumentMetrics;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scores how a simulated audience reacts to one argument
#[derive(Debug)]
pub struct AudienceSimulator {
    rng: StdRng,
}

impl AudienceSimulator {
    /// Jitter bounds added to every reaction
    pub const JITTER: (i64, i64) = (-2, 3);

    /// Seeded simulators produce the same reactions on every run
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Reaction before jitter
    pub fn base_score(metrics: &ArgumentMetrics) -> i64 {
        let mut score = (metrics.persuasiveness * 10.0).floor() as i64;
        if metrics.evidence_quality > 0.7 {
            score += 3;
        }
        if metrics.emotional_appeal > 0.3 && metrics.emotional_appeal < 0.7 {
            score += 2;
        }
        score
    }

    /// Votes won by an argument, never negative
    pub fn react(&mut self, metrics: &ArgumentMetrics) -> u32 {
        let jitter = self.rng.random_range(Self::JITTER.0..=Self::JITTER.1);
        (Self::base_score(metrics) + jitter).max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(persuasiveness: f64, evidence_quality: f64, emotional_appeal: f64) -> ArgumentMetrics {
        ArgumentMetrics {
            persuasiveness,
            evidence_quality,
            emotional_appeal,
            ..Default::default()
        }
    }

    #[test]
    fn test_base_score_bonuses() {
        assert_eq!(AudienceSimulator::base_score(&metrics(0.3, 0.5, 0.0)), 3);
        assert_eq!(AudienceSimulator::base_score(&metrics(0.3, 0.71, 0.0)), 6);
        assert_eq!(AudienceSimulator::base_score(&metrics(0.3, 0.7, 0.5)), 5);
        // bounds on emotional appeal are exclusive
        assert_eq!(AudienceSimulator::base_score(&metrics(0.3, 0.0, 0.3)), 3);
        assert_eq!(AudienceSimulator::base_score(&metrics(0.3, 0.0, 0.7)), 3);
        assert_eq!(AudienceSimulator::base_score(&metrics(0.99, 0.0, 0.0)), 9);
    }

    #[test]
    fn test_reaction_stays_within_jitter() {
        let mut audience = AudienceSimulator::new(Some(7));
        let m = metrics(0.5, 0.8, 0.5);
        for _ in 0..200 {
            let votes = audience.react(&m);
            assert!((8..=13).contains(&votes), "votes {} out of range", votes);
        }
    }

    #[test]
    fn test_reaction_never_negative() {
        let mut audience = AudienceSimulator::new(None);
        let m = metrics(0.0, 0.0, 0.0);
        for _ in 0..200 {
            assert!(audience.react(&m) <= 3);
        }
    }

    #[test]
    fn test_seed_makes_reactions_repeatable() {
        let m = metrics(0.4, 0.2, 0.1);
        let mut a = AudienceSimulator::new(Some(42));
        let mut b = AudienceSimulator::new(Some(42));
        let first: Vec<u32> = (0..20).map(|_| a.react(&m)).collect();
        let second: Vec<u32> = (0..20).map(|_| b.react(&m)).collect();
        assert_eq!(first, second);
    }
}
