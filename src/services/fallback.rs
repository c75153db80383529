//! Degraded local classification
//!
//! Used when the language model is disabled, times out, fails or returns
//! output that cannot be parsed. Two strategies exist: entity-shape inference
//! and a plain keyword scan. `FallbackOrder` decides which is tried first;
//! the first one producing a category wins.

use crate::config::config::FallbackOrder;
use crate::lexicon::keywords::KEYWORD_CATEGORIES;
use crate::lexicon::tokenize;
use crate::models::classification::{ClassificationResult, ClassificationStage, QueryCategory};
use crate::models::entity::{ExtractedEntity, Sport};
use crate::services::context_inference;

/// Ceiling on any degraded confidence
pub const MAX_DEGRADED_CONFIDENCE: f32 = 0.5;
pub const KEYWORD_CONFIDENCE: f32 = 0.45;
pub const UNCLEAR_CONFIDENCE: f32 = 0.3;

/// First keyword of the fallback table present in the text
pub fn keyword_category(text: &str) -> Option<QueryCategory> {
    let words: Vec<String> = tokenize(text).iter().map(|t| t.text.to_lowercase()).collect();
    KEYWORD_CATEGORIES
        .iter()
        .find(|(keyword, _)| words.iter().any(|w| w == keyword))
        .map(|(_, category)| *category)
}

fn by_entities(text: &str, entities: &[ExtractedEntity]) -> Option<(QueryCategory, f32, String)> {
    context_inference::infer(text, entities).map(|inferred| {
        (
            inferred.category,
            inferred.confidence.min(MAX_DEGRADED_CONFIDENCE),
            format!("degraded: {}", inferred.reason),
        )
    })
}

fn by_keywords(text: &str) -> Option<(QueryCategory, f32, String)> {
    keyword_category(text).map(|category| {
        (
            category,
            KEYWORD_CONFIDENCE,
            format!("degraded: keyword match for {}", category),
        )
    })
}

/// Deterministic classification without the language model
pub fn classify(
    text: &str,
    entities: &[ExtractedEntity],
    sport: Sport,
    order: FallbackOrder,
) -> ClassificationResult {
    let picked = match order {
        FallbackOrder::EntityFirst => by_entities(text, entities).or_else(|| by_keywords(text)),
        FallbackOrder::KeywordFirst => by_keywords(text).or_else(|| by_entities(text, entities)),
    };

    let (category, confidence, reasoning) = picked.unwrap_or_else(|| {
        (
            QueryCategory::Unclear,
            UNCLEAR_CONFIDENCE,
            "degraded: no keyword or entity signal".to_string(),
        )
    });

    ClassificationResult::new(
        category,
        sport,
        confidence,
        entities.to_vec(),
        ClassificationStage::KeywordFallback,
    )
    .with_reasoning(reasoning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::entity_extractor::extract;

    fn run(text: &str, order: FallbackOrder) -> ClassificationResult {
        classify(text, &extract(text), Sport::General, order)
    }

    #[test]
    fn test_keyword_fallback() {
        let result = run("thoughts on the playoffs", FallbackOrder::EntityFirst);
        assert_eq!(result.category, QueryCategory::Standings);
        assert!(result.confidence <= MAX_DEGRADED_CONFIDENCE);
        assert_eq!(result.stage, ClassificationStage::KeywordFallback);
    }

    #[test]
    fn test_nothing_is_unclear() {
        let result = run("blorp zzz", FallbackOrder::KeywordFirst);
        assert_eq!(result.category, QueryCategory::Unclear);
        assert_eq!(result.confidence, UNCLEAR_CONFIDENCE);
    }

    #[test]
    fn test_order_decides_between_strategies() {
        // one team (form check by shape) plus an injury keyword
        let text = "Lakers hurt";
        assert_eq!(run(text, FallbackOrder::EntityFirst).category, QueryCategory::FormCheck);
        assert_eq!(run(text, FallbackOrder::KeywordFirst).category, QueryCategory::InjuryNews);
    }

    #[test]
    fn test_entity_confidence_capped() {
        let result = run("Lakers vs Celtics", FallbackOrder::EntityFirst);
        assert_eq!(result.category, QueryCategory::MatchPrediction);
        assert_eq!(result.confidence, MAX_DEGRADED_CONFIDENCE);
    }
}
