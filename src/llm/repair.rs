//! Structured-output repair
//!
//! The model is asked for a JSON object shaped like a classification result.
//! `repair` is pure: every missing or invalid field gets a safe default, so
//! nothing downstream ever sees model output that does not fit the schema.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::lexicon::LEXICON;
use crate::models::classification::{ClassificationResult, ClassificationStage, QueryCategory};
use crate::models::entity::{EntityType, ExtractedEntity, League, Sport, clamp_confidence};

pub const DEFAULT_CONFIDENCE: f32 = 0.5;
pub const DEFAULT_ENTITY_CONFIDENCE: f32 = 0.5;

/// Locate the first balanced JSON object in free text
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse model output into a JSON object
pub fn parse_response(text: &str) -> Result<Value> {
    let object = extract_json_object(text)
        .ok_or_else(|| AppError::Serialization("no JSON object in model output".into()))?;
    Ok(serde_json::from_str(object)?)
}

/// Coerce a loosely shaped object into a valid classification result
pub fn repair(raw: &Value) -> ClassificationResult {
    let category = match raw.get("category").and_then(Value::as_str) {
        None => QueryCategory::Unclear,
        Some(text) => QueryCategory::parse(text).unwrap_or(QueryCategory::General),
    };

    let confidence = raw
        .get("confidence")
        .and_then(numeric)
        .map(clamp_confidence)
        .unwrap_or(DEFAULT_CONFIDENCE);

    let entities: Vec<ExtractedEntity> = raw
        .get("entities")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().filter_map(repair_entity).collect())
        .unwrap_or_default();

    let sport = raw
        .get("sport")
        .and_then(Value::as_str)
        .and_then(Sport::parse)
        .unwrap_or_else(|| infer_sport(&entities));

    let mut result = ClassificationResult::new(category, sport, confidence, entities, ClassificationStage::LanguageModel);
    if let Some(flag) = raw.get("needs_realtime").and_then(Value::as_bool) {
        result.needs_realtime = flag;
    }
    if let Some(flag) = raw.get("needs_api_data").and_then(Value::as_bool) {
        result.needs_api_data = flag;
    }
    if let Some(flag) = raw.get("is_betting_related").and_then(Value::as_bool) {
        result.is_betting_related = flag;
    }
    if let Some(reasoning) = raw.get("reasoning").and_then(Value::as_str) {
        if !reasoning.trim().is_empty() {
            result.reasoning = Some(reasoning.trim().to_string());
        }
    }
    result
}

fn numeric(value: &Value) -> Option<f32> {
    let parsed = match value {
        Value::Number(n) => n.as_f64().map(|v| v as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn repair_entity(row: &Value) -> Option<ExtractedEntity> {
    let name = row.get("name").and_then(Value::as_str)?.trim();
    if name.is_empty() {
        return None;
    }
    let entity_type = row
        .get("type")
        .and_then(Value::as_str)
        .map(EntityType::parse)
        .unwrap_or(EntityType::Unknown);
    let confidence = row
        .get("confidence")
        .and_then(numeric)
        .unwrap_or(DEFAULT_ENTITY_CONFIDENCE);

    let mut entity = ExtractedEntity::new(entity_type, name, confidence);
    if let Some(sport) = row.get("sport").and_then(Value::as_str).and_then(Sport::parse) {
        entity = entity.with_sport(sport);
    } else if let Some(league) = known_league(name) {
        entity = entity.with_league(league);
    }
    Some(entity)
}

fn known_league(name: &str) -> Option<League> {
    LEXICON
        .player(name)
        .map(|p| p.league)
        .or_else(|| LEXICON.team(name).map(|t| t.league))
}

/// First specific sport among the entities, else general
pub fn infer_sport(entities: &[ExtractedEntity]) -> Sport {
    entities
        .iter()
        .filter_map(|e| e.sport)
        .find(|s| *s != Sport::General)
        .unwrap_or(Sport::General)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_json_from_chatter() {
        let text = "Sure! Here you go:\n```json\n{\"category\": \"LIVE_SCORE\", \"reasoning\": \"a } inside\"}\n``` done";
        let object = extract_json_object(text).unwrap();
        assert!(object.starts_with('{') && object.ends_with('}'));
        assert_eq!(parse_response(text).unwrap()["category"], "LIVE_SCORE");
    }

    #[test]
    fn test_unparsable_output() {
        assert!(matches!(parse_response("I think it is about stats"), Err(AppError::Serialization(_))));
        assert!(parse_response("{\"category\": ").is_err());
    }

    #[test]
    fn test_complete_response_is_kept() {
        let result = repair(&json!({
            "category": "INJURY_NEWS",
            "sport": "basketball",
            "confidence": 0.83,
            "entities": [{"type": "PLAYER", "name": "LeBron James", "confidence": 0.9}],
            "needs_realtime": true,
            "needs_api_data": false,
            "is_betting_related": false,
            "reasoning": "asks about an injury"
        }));
        assert_eq!(result.category, QueryCategory::InjuryNews);
        assert_eq!(result.sport, Sport::Basketball);
        assert!((result.confidence - 0.83).abs() < 1e-6);
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.stage, ClassificationStage::LanguageModel);
        assert_eq!(result.reasoning.as_deref(), Some("asks about an injury"));
    }

    #[test]
    fn test_missing_category_is_unclear() {
        assert_eq!(repair(&json!({})).category, QueryCategory::Unclear);
    }

    #[test]
    fn test_unknown_category_is_general() {
        assert_eq!(repair(&json!({"category": "WEATHER"})).category, QueryCategory::General);
    }

    #[test]
    fn test_confidence_defaults_and_clamps() {
        assert_eq!(repair(&json!({"confidence": "high"})).confidence, DEFAULT_CONFIDENCE);
        assert_eq!(repair(&json!({"confidence": null})).confidence, DEFAULT_CONFIDENCE);
        assert_eq!(repair(&json!({"confidence": 7})).confidence, 1.0);
        assert_eq!(repair(&json!({"confidence": -1})).confidence, 0.0);
        assert!((repair(&json!({"confidence": "0.4"})).confidence - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_entity_rows_dropped() {
        let result = repair(&json!({
            "category": "PLAYER_STATS",
            "entities": [
                {"type": "PLAYER", "name": "Nikola Jokic"},
                {"type": "PLAYER"},
                {"name": "   "},
                "Jokic",
                {"type": "ALIEN", "name": "Somebody"}
            ]
        }));
        assert_eq!(result.entities.len(), 2);
        assert_eq!(result.entities[0].league, Some(League::Nba));
        assert_eq!(result.entities[1].entity_type, EntityType::Unknown);
    }

    #[test]
    fn test_entities_not_a_list() {
        assert!(repair(&json!({"entities": "none"})).entities.is_empty());
    }

    #[test]
    fn test_flags_default_from_category() {
        let result = repair(&json!({"category": "BETTING_ODDS", "needs_realtime": "yes"}));
        assert!(result.needs_realtime);
        assert!(result.needs_api_data);
        assert!(result.is_betting_related);
    }

    #[test]
    fn test_invalid_sport_inferred_from_entities() {
        let result = repair(&json!({
            "category": "PLAYER_STATS",
            "sport": "curling",
            "entities": [{"type": "PLAYER", "name": "Connor McDavid"}]
        }));
        assert_eq!(result.sport, Sport::Hockey);
        assert_eq!(repair(&json!({"sport": 12})).sport, Sport::General);
    }
}
