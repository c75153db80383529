//! Context Inference Fallback
//!
//! Infers intent from the shape of the extracted entities when the pattern
//! classifier is not confident enough.

use crate::lexicon::keywords::{PAST_TENSE_MARKERS, SCHEDULE_KEYWORDS};
use crate::lexicon::tokenize;
use crate::models::classification::QueryCategory;
use crate::models::entity::{EntityType, ExtractedEntity};
use crate::services::entity_extractor::{is_separator_gap, team_like_mentions};

pub const SHORT_QUERY_MAX_TOKENS: usize = 6;
pub const SHORT_QUERY_CONFIDENCE: f32 = 0.92;
pub const MATCHUP_CONFIDENCE: f32 = 0.75;
pub const SCHEDULE_CONFIDENCE: f32 = 0.75;
pub const FORM_CHECK_CONFIDENCE: f32 = 0.65;
pub const PLAYER_STATS_CONFIDENCE: f32 = 0.7;

/// An intent inferred from entity composition
#[derive(Debug, Clone, PartialEq)]
pub struct InferredIntent {
    pub category: QueryCategory,
    pub confidence: f32,
    pub reason: &'static str,
}

impl InferredIntent {
    fn new(category: QueryCategory, confidence: f32, reason: &'static str) -> Self {
        Self {
            category,
            confidence,
            reason,
        }
    }
}

/// `Lakers vs Celtics`, `Celtics - Knicks`, `warriors nuggets`
///
/// At most six tokens with exactly two team-like tokens (dictionary teams or
/// capitalized nicknames such as `Heat`) joined by a separator token or
/// nothing at all.
pub fn is_short_matchup(text: &str) -> bool {
    if tokenize(text).len() > SHORT_QUERY_MAX_TOKENS {
        return false;
    }
    let mentions = team_like_mentions(text);
    if mentions.len() != 2 {
        return false;
    }
    let (first, second) = (&mentions[0], &mentions[1]);
    first.team.name != second.team.name && is_separator_gap(&text[first.end..second.start])
}

/// Infer an intent; `None` when the entities say nothing useful
pub fn infer(text: &str, entities: &[ExtractedEntity]) -> Option<InferredIntent> {
    if is_short_matchup(text) {
        return Some(InferredIntent::new(
            QueryCategory::MatchPrediction,
            SHORT_QUERY_CONFIDENCE,
            "short query naming two teams",
        ));
    }

    let teams = entities.iter().filter(|e| e.entity_type == EntityType::Team).count();
    let players = entities.iter().filter(|e| e.entity_type == EntityType::Player).count();
    let words: Vec<String> = tokenize(text).iter().map(|t| t.text.to_lowercase()).collect();
    let has_any = |table: &[&str]| words.iter().any(|w| table.contains(&w.as_str()));

    if teams >= 2 {
        return Some(if has_any(PAST_TENSE_MARKERS) {
            InferredIntent::new(QueryCategory::MatchResult, MATCHUP_CONFIDENCE, "two teams with past-tense verb")
        } else {
            InferredIntent::new(QueryCategory::MatchPrediction, MATCHUP_CONFIDENCE, "two or more teams")
        });
    }
    if teams == 1 && has_any(SCHEDULE_KEYWORDS) {
        return Some(InferredIntent::new(
            QueryCategory::Schedule,
            SCHEDULE_CONFIDENCE,
            "one team with scheduling keyword",
        ));
    }
    if teams == 1 {
        return Some(InferredIntent::new(QueryCategory::FormCheck, FORM_CHECK_CONFIDENCE, "single team"));
    }
    if players >= 1 {
        return Some(InferredIntent::new(
            QueryCategory::PlayerStats,
            PLAYER_STATS_CONFIDENCE,
            "players without a team",
        ));
    }
    None
}
