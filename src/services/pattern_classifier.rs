//! Pattern Intent Classifier
//!
//! Every rule whose patterns match contributes a candidate; the highest
//! priority wins and confidence comes from the gap to the runner-up.
//! Deterministic and side-effect free.

use crate::models::classification::QueryCategory;
use crate::models::entity::normalize_name;
use crate::services::intent_rules::{COMPILED_RULES, CompiledRule};

/// Confidence when nothing matched
pub const NO_MATCH_CONFIDENCE: f32 = 0.3;

const MAX_ALTERNATIVES: usize = 2;

/// A matching rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentCandidate {
    pub category: QueryCategory,
    pub priority: u8,
}

/// Pattern classification
#[derive(Debug, Clone, PartialEq)]
pub struct PatternClassification {
    pub category: QueryCategory,
    pub confidence: f32,
    /// Runner-up categories, best first
    pub alternatives: Vec<QueryCategory>,
    /// Every matching candidate, best first
    pub candidates: Vec<IntentCandidate>,
}

impl PatternClassification {
    pub fn is_match(&self) -> bool {
        !self.candidates.is_empty()
    }
}

/// Classifier over a compiled rule table
pub struct PatternClassifier<'a> {
    rules: &'a [CompiledRule],
}

impl Default for PatternClassifier<'static> {
    fn default() -> Self {
        Self {
            rules: COMPILED_RULES.as_slice(),
        }
    }
}

impl<'a> PatternClassifier<'a> {
    pub fn new(rules: &'a [CompiledRule]) -> Self {
        Self { rules }
    }

    pub fn classify(&self, text: &str) -> PatternClassification {
        let normalized = normalize_name(text);

        // best priority per category, then priority desc with table order as tie-break
        let mut candidates: Vec<(usize, IntentCandidate)> = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            if !rule.is_match(&normalized) {
                continue;
            }
            match candidates.iter_mut().find(|(_, c)| c.category == rule.category) {
                Some((_, existing)) if existing.priority >= rule.priority => {}
                Some((_, existing)) => existing.priority = rule.priority,
                None => candidates.push((
                    index,
                    IntentCandidate {
                        category: rule.category,
                        priority: rule.priority,
                    },
                )),
            }
        }
        candidates.sort_by(|a, b| b.1.priority.cmp(&a.1.priority).then(a.0.cmp(&b.0)));
        let candidates: Vec<IntentCandidate> = candidates.into_iter().map(|(_, c)| c).collect();

        let Some(winner) = candidates.first() else {
            return PatternClassification {
                category: QueryCategory::Unclear,
                confidence: NO_MATCH_CONFIDENCE,
                alternatives: Vec::new(),
                candidates,
            };
        };

        let runner_up = candidates.get(1).map(|c| c.priority);
        PatternClassification {
            category: winner.category,
            confidence: gap_confidence(winner.priority, runner_up),
            alternatives: candidates
                .iter()
                .skip(1)
                .take(MAX_ALTERNATIVES)
                .map(|c| c.category)
                .collect(),
            candidates,
        }
    }
}

/// Confidence from the priority gap between winner and runner-up
pub fn gap_confidence(winner: u8, runner_up: Option<u8>) -> f32 {
    match runner_up {
        None => 0.85 + 0.10 * f32::from(winner.min(100)) / 100.0,
        Some(second) => {
            let gap = f32::from(winner.saturating_sub(second));
            if gap >= 20.0 {
                0.85 + 0.10 * (gap - 20.0).min(30.0) / 30.0
            } else {
                0.60 + 0.15 * gap / 20.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> PatternClassification {
        PatternClassifier::default().classify(text)
    }

    #[test]
    fn test_no_match_is_unclear() {
        let result = classify("Lakers vs Celtics");
        assert_eq!(result.category, QueryCategory::Unclear);
        assert_eq!(result.confidence, NO_MATCH_CONFIDENCE);
        assert!(!result.is_match());
    }

    #[test]
    fn test_single_match_confidence() {
        let result = classify("Jokic points");
        assert_eq!(result.category, QueryCategory::PlayerStats);
        assert!((result.confidence - 0.91).abs() < 1e-6);
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn test_large_gap_confidence() {
        // injury (88) vs stats (60): gap 28
        let result = classify("LeBron injury and stats");
        assert_eq!(result.category, QueryCategory::InjuryNews);
        let expected = 0.85 + 0.10 * 8.0 / 30.0;
        assert!((result.confidence - expected).abs() < 1e-6);
        assert_eq!(result.alternatives, vec![QueryCategory::PlayerStats]);
    }

    #[test]
    fn test_small_gap_confidence() {
        // prediction (72) vs result (70): gap 2
        let result = classify("who wins and what was the result");
        assert_eq!(result.category, QueryCategory::MatchPrediction);
        assert!((result.confidence - (0.60 + 0.15 * 2.0 / 20.0)).abs() < 1e-6);
    }

    #[test]
    fn test_alternatives_capped_at_two() {
        let result = classify("live odds injury news standings");
        assert_eq!(result.category, QueryCategory::LiveScore);
        assert_eq!(result.alternatives.len(), 2);
        assert_eq!(result.alternatives[0], QueryCategory::InjuryNews);
        assert!(result.candidates.len() > 2);
    }

    #[test]
    fn test_deterministic() {
        let first = classify("Who will win the Super Bowl?");
        for _ in 0..5 {
            assert_eq!(classify("Who will win the Super Bowl?"), first);
        }
    }

    #[test]
    fn test_gap_confidence_bounds() {
        assert!((gap_confidence(100, None) - 0.95).abs() < 1e-6);
        assert!((gap_confidence(90, Some(20)) - 0.95).abs() < 1e-6);
        assert!((gap_confidence(60, Some(60)) - 0.60).abs() < 1e-6);
    }
}
