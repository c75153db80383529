//! Data-Source Router
//!
//! Pure mapping from (normalized query, classification) to a routing
//! decision. Checks run in precedence order and the first match wins:
//! static content (static categories, or definition and greeting wording on
//! an otherwise general query), explicit real-time triggers, archival patterns (promoted
//! to real-time by a current-season trigger), the per-category table, and a
//! generic fallback.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::classification::{ClassificationResult, QueryCategory};
use crate::models::routing::{DataSource, Recency, RoutingDecision};

pub const STATIC_CONFIDENCE: f32 = 0.95;
pub const TRIGGER_CONFIDENCE: f32 = 0.9;
pub const ARCHIVAL_CONFIDENCE: f32 = 0.85;
pub const PROMOTED_CONFIDENCE: f32 = 0.8;
pub const GENERIC_CONFIDENCE: f32 = 0.6;

fn regex(source: &str) -> Regex {
    Regex::new(source).expect("routing pattern is valid")
}

static STATIC_PATTERNS: Lazy<Regex> = Lazy::new(|| {
    regex(r"\b(what is an?|what does .+ mean|define|definition of|rules? of|how does .+ work|explain the rule|hello|hi there|thank(s| you)|what if|imagine if|hypothetically)\b")
});

/// Real-time trigger classes with their recency
static REALTIME_TRIGGERS: Lazy<Vec<(Regex, Recency, &'static str)>> = Lazy::new(|| {
    vec![
        (
            regex(r"\b(live|lineups?|starting (five|xi|lineup)|today|tonight|right now|now|current score|in progress)\b"),
            Recency::Hour,
            "live-data trigger",
        ),
        (
            regex(r"\b(breaking|just in|injur(y|ies|ed)|ruled out|questionable)\b"),
            Recency::Day,
            "news trigger",
        ),
        (
            regex(r"\b(standings?|table|seeding|playoff picture)\b"),
            Recency::Week,
            "standings trigger",
        ),
    ]
});

static ARCHIVAL_PATTERNS: Lazy<Regex> = Lazy::new(|| {
    regex(r"\b(all[- ]time|history|historical|born|career|ever|hall of fame|retired|legend(s|ary)?|in (19|20)\d{2})\b")
});

static CURRENT_SEASON: Lazy<Regex> =
    Lazy::new(|| regex(r"\b(this (season|year|week)|current season|so far|currently)\b"));

/// Per-category routing defaults
#[derive(Debug, Clone)]
pub struct DataSourceRouter {
    table: HashMap<QueryCategory, (DataSource, Recency, f32)>,
}

impl Default for DataSourceRouter {
    fn default() -> Self {
        use QueryCategory::*;

        let table = [
            (PlayerStats, (DataSource::Hybrid, Recency::Week, 0.75)),
            (TeamStats, (DataSource::Hybrid, Recency::Week, 0.75)),
            (HeadToHead, (DataSource::Hybrid, Recency::Month, 0.75)),
            (LiveScore, (DataSource::Realtime, Recency::Hour, 0.85)),
            (Lineup, (DataSource::Realtime, Recency::Hour, 0.85)),
            (BettingOdds, (DataSource::Realtime, Recency::Hour, 0.85)),
            (InjuryNews, (DataSource::Realtime, Recency::Day, 0.8)),
            (Transfer, (DataSource::Realtime, Recency::Day, 0.8)),
            (BreakingNews, (DataSource::Realtime, Recency::Day, 0.8)),
            (Standings, (DataSource::Realtime, Recency::Day, 0.8)),
            (MatchPrediction, (DataSource::Realtime, Recency::Day, 0.75)),
            (MatchResult, (DataSource::Realtime, Recency::Day, 0.75)),
            (Schedule, (DataSource::Realtime, Recency::Week, 0.75)),
            (FormCheck, (DataSource::Realtime, Recency::Week, 0.75)),
            (Historical, (DataSource::Archival, Recency::Month, 0.8)),
            (RulesExplanation, (DataSource::None, Recency::Month, 0.9)),
            (Greeting, (DataSource::None, Recency::Month, 0.9)),
            (Hypothetical, (DataSource::None, Recency::Month, 0.85)),
            (General, (DataSource::Realtime, Recency::Week, 0.6)),
            (Unclear, (DataSource::Realtime, Recency::Week, 0.5)),
        ];
        Self {
            table: table.into_iter().collect(),
        }
    }
}

impl DataSourceRouter {
    /// Router with a custom category table
    pub fn with_table(table: HashMap<QueryCategory, (DataSource, Recency, f32)>) -> Self {
        Self { table }
    }

    pub fn route(&self, normalized_query: &str, classification: &ClassificationResult) -> RoutingDecision {
        let text = normalized_query.to_lowercase();
        let category = classification.category;

        let is_static = match category {
            QueryCategory::RulesExplanation | QueryCategory::Greeting | QueryCategory::Hypothetical => true,
            QueryCategory::General | QueryCategory::Unclear => STATIC_PATTERNS.is_match(&text),
            _ => false,
        };
        if is_static {
            return RoutingDecision::new(
                DataSource::None,
                Recency::Month,
                STATIC_CONFIDENCE,
                &format!("static content ({}), no lookup needed", category),
            );
        }

        if let Some((_, recency, label)) = REALTIME_TRIGGERS.iter().find(|(re, _, _)| re.is_match(&text)) {
            return RoutingDecision::new(
                DataSource::Realtime,
                *recency,
                TRIGGER_CONFIDENCE,
                &format!("{} in query", label),
            );
        }

        if ARCHIVAL_PATTERNS.is_match(&text) {
            if CURRENT_SEASON.is_match(&text) {
                return RoutingDecision::new(
                    DataSource::Realtime,
                    Recency::Week,
                    PROMOTED_CONFIDENCE,
                    "archival wording with current-season trigger",
                );
            }
            return RoutingDecision::new(
                DataSource::Archival,
                Recency::Month,
                ARCHIVAL_CONFIDENCE,
                "archival or all-time reference",
            );
        }

        if let Some((source, recency, confidence)) = self.table.get(&category) {
            return RoutingDecision::new(
                *source,
                *recency,
                *confidence,
                &format!("category default for {}", category),
            );
        }

        RoutingDecision::new(
            DataSource::Realtime,
            Recency::Week,
            GENERIC_CONFIDENCE,
            &format!("no routing rule for {}, preferring fresh data", category),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classification::ClassificationStage;
    use crate::models::entity::Sport;
    use rstest::rstest;

    fn classified(category: QueryCategory) -> ClassificationResult {
        ClassificationResult::new(category, Sport::General, 0.9, vec![], ClassificationStage::Pattern)
    }

    fn route(query: &str, category: QueryCategory) -> RoutingDecision {
        DataSourceRouter::default().route(query, &classified(category))
    }

    #[test]
    fn test_every_category_has_a_default() {
        let router = DataSourceRouter::default();
        for category in QueryCategory::ALL {
            assert!(router.table.contains_key(&category), "{} missing", category);
        }
    }

    #[test]
    fn test_static_content() {
        let decision = route("what is an offside trap", QueryCategory::General);
        assert_eq!(decision.source, DataSource::None);
        assert_eq!(decision.confidence, STATIC_CONFIDENCE);
        assert_eq!(route("hey", QueryCategory::Greeting).source, DataSource::None);
    }

    #[rstest]
    #[case("what is a good spread for lakers vs celtics tonight?", QueryCategory::BettingOdds, Recency::Hour)]
    #[case("hi, what's the score right now?", QueryCategory::LiveScore, Recency::Hour)]
    #[case("hello, is lebron injured?", QueryCategory::InjuryNews, Recency::Day)]
    fn test_static_wording_does_not_hide_triggers(
        #[case] query: &str,
        #[case] category: QueryCategory,
        #[case] recency: Recency,
    ) {
        let decision = route(query, category);
        assert_eq!(decision.source, DataSource::Realtime);
        assert_eq!(decision.recency, recency);
    }

    #[rstest]
    #[case("lakers score tonight", Recency::Hour)]
    #[case("is tatum injured", Recency::Day)]
    #[case("nba standings", Recency::Week)]
    fn test_realtime_triggers(#[case] query: &str, #[case] recency: Recency) {
        let decision = route(query, QueryCategory::General);
        assert_eq!(decision.source, DataSource::Realtime);
        assert_eq!(decision.recency, recency);
        assert_eq!(decision.confidence, TRIGGER_CONFIDENCE);
    }

    #[test]
    fn test_archival_and_promotion() {
        let archival = route("most points ever in a career", QueryCategory::PlayerStats);
        assert_eq!(archival.source, DataSource::Archival);
        assert_eq!(archival.recency, Recency::Month);

        let promoted = route("is he the best ever this season", QueryCategory::PlayerStats);
        assert_eq!(promoted.source, DataSource::Realtime);
        assert_eq!(promoted.recency, Recency::Week);
    }

    #[test]
    fn test_category_table() {
        let decision = route("jokic points", QueryCategory::PlayerStats);
        assert_eq!(decision.source, DataSource::Hybrid);
        assert_eq!(decision.recency, Recency::Week);
        assert!(!decision.reason.is_empty());
    }

    #[test]
    fn test_generic_fallback() {
        let router = DataSourceRouter::with_table(HashMap::new());
        let decision = router.route("something odd", &classified(QueryCategory::TeamStats));
        assert_eq!(decision.source, DataSource::Realtime);
        assert_eq!(decision.confidence, GENERIC_CONFIDENCE);
        assert!(!decision.reason.is_empty());
    }
}
