//! Entity Extractor
//!
//! Pure text → entities function. Dictionary players and teams come from the
//! lexicon; unlisted players are guessed from two adjacent capitalized words;
//! matches come from `A vs B` style pairs. Never fails: an empty list is a
//! normal result.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::keywords::{CAPITALIZED_STOPWORDS, MATCH_SEPARATORS};
use crate::lexicon::{AliasTarget, FoldedText, LEXICON, TeamRecord, TermMatch, tokenize};
use crate::models::entity::{EntityType, ExtractedEntity, merge_entities};

pub const PLAYER_CONFIDENCE: f32 = 0.95;
pub const TEAM_CONFIDENCE: f32 = 0.9;
pub const LEAGUE_CONFIDENCE: f32 = 0.9;
pub const KNOWN_MATCH_CONFIDENCE: f32 = 0.9;
pub const UNKNOWN_MATCH_CONFIDENCE: f32 = 0.7;
pub const CAPITALIZED_PLAYER_CONFIDENCE: f32 = 0.6;

static CAPITALIZED_MATCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\p{Lu}[\p{L}'.]*(?:\s+\p{Lu}[\p{L}'.]*)*)\s+(?:vs\.?|versus|v\.?)\s+(\p{Lu}[\p{L}'.]*(?:\s+\p{Lu}[\p{L}'.]*)*)",
    )
    .expect("capitalized match pattern is valid")
});

/// A dictionary team mention in the original text
#[derive(Debug, Clone, Copy)]
pub struct TeamMention {
    pub start: usize,
    pub end: usize,
    pub team: &'static TeamRecord,
}

/// One side of a match pair
#[derive(Debug, Clone)]
struct Side {
    start: usize,
    end: usize,
    name: String,
    team: Option<&'static TeamRecord>,
}

/// Extract entities in text order, de-duplicated by normalized name
pub fn extract(text: &str) -> Vec<ExtractedEntity> {
    let folded = FoldedText::new(text);
    let aliases = LEXICON.find_aliases(&folded);

    let mut found: Vec<(usize, ExtractedEntity)> = Vec::new();
    for m in &aliases {
        let entity = match m.value {
            AliasTarget::Player(p) => {
                ExtractedEntity::new(EntityType::Player, p.name, PLAYER_CONFIDENCE).with_league(p.league)
            }
            AliasTarget::Team(t) => {
                ExtractedEntity::new(EntityType::Team, t.name, TEAM_CONFIDENCE).with_league(t.league)
            }
            AliasTarget::League(l) => {
                ExtractedEntity::new(EntityType::League, l.as_str(), LEAGUE_CONFIDENCE).with_league(l)
            }
        };
        found.push((m.start, entity));
    }

    let mut claimed: Vec<(usize, usize)> = aliases.iter().map(|m| (m.start, m.end)).collect();

    for (anchor, entity, span) in known_matches(text, &folded, &aliases) {
        claimed.push(span);
        found.push((anchor, entity));
    }

    for (anchor, entity, span) in capitalized_matches(text, &claimed) {
        claimed.push(span);
        found.push((anchor, entity));
    }

    for (anchor, entity) in capitalized_players(text, &claimed) {
        found.push((anchor, entity));
    }

    found.sort_by_key(|(anchor, _)| *anchor);
    merge_entities(found.into_iter().map(|(_, e)| e).collect(), Vec::new())
}

/// Dictionary team mentions in text order
pub fn team_mentions(text: &str) -> Vec<TeamMention> {
    LEXICON
        .find_aliases(&FoldedText::new(text))
        .into_iter()
        .filter_map(|m| match m.value {
            AliasTarget::Team(team) => Some(TeamMention {
                start: m.start,
                end: m.end,
                team,
            }),
            _ => None,
        })
        .collect()
}

/// Dictionary team mentions plus capitalized nicknames (`Heat`, `Kings`) that
/// no alias covers, in text order
pub fn team_like_mentions(text: &str) -> Vec<TeamMention> {
    let mut mentions = team_mentions(text);
    for m in LEXICON.find_nicknames(text) {
        if !mentions.iter().any(|t| m.start < t.end && t.start < m.end) {
            mentions.push(TeamMention {
                start: m.start,
                end: m.end,
                team: m.value,
            });
        }
    }
    mentions.sort_by_key(|m| m.start);
    mentions
}

/// Whether the text between two mentions is empty or a single separator token
pub fn is_separator_gap(gap: &str) -> bool {
    let gap = gap.trim().to_lowercase();
    gap.is_empty() || gap == "," || MATCH_SEPARATORS.contains(&gap.as_str())
}

fn separated_by_token(text: &str, start: usize, end: usize) -> bool {
    start <= end && MATCH_SEPARATORS.contains(&text[start..end].trim().to_lowercase().as_str())
}

/// Matches whose sides are both dictionary teams or multi-league places.
/// Only known sides are paired, so `at` and `-` never join arbitrary words.
fn known_matches(
    text: &str,
    folded: &FoldedText,
    aliases: &[TermMatch<AliasTarget>],
) -> Vec<(usize, ExtractedEntity, (usize, usize))> {
    let mut sides: Vec<Side> = aliases
        .iter()
        .filter_map(|m| match m.value {
            AliasTarget::Team(team) => Some(Side {
                start: m.start,
                end: m.end,
                name: team.name.to_string(),
                team: Some(team),
            }),
            _ => None,
        })
        .collect();
    for place in LEXICON.find_places(folded) {
        let covered = aliases.iter().any(|m| place.start < m.end && m.start < place.end);
        if !covered {
            sides.push(Side {
                start: place.start,
                end: place.end,
                name: place.place.to_string(),
                team: None,
            });
        }
    }
    sides.sort_by_key(|s| s.start);

    let mut matches = Vec::new();
    let mut i = 0;
    while i + 1 < sides.len() {
        let (a, b) = (&sides[i], &sides[i + 1]);
        if !separated_by_token(text, a.end, b.start) {
            i += 1;
            continue;
        }
        let (confidence, sport) = match (a.team, b.team) {
            (Some(x), Some(y)) => {
                let sport = (x.league.sport() == y.league.sport()).then(|| x.league.sport());
                (KNOWN_MATCH_CONFIDENCE, sport)
            }
            _ => (UNKNOWN_MATCH_CONFIDENCE, None),
        };
        let mut entity = ExtractedEntity::new(EntityType::Match, &format!("{} vs {}", a.name, b.name), confidence);
        if let Some(sport) = sport {
            entity = entity.with_sport(sport);
        }
        matches.push((b.end, entity, (a.start, b.end)));
        i += 2;
    }
    matches
}

/// `A vs B` with capitalized, unknown sides
fn capitalized_matches(text: &str, claimed: &[(usize, usize)]) -> Vec<(usize, ExtractedEntity, (usize, usize))> {
    let mut matches = Vec::new();
    for caps in CAPITALIZED_MATCH.captures_iter(text) {
        let (Some(whole), Some(a), Some(b)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if overlaps_any(claimed, whole.start(), whole.end()) {
            continue;
        }
        let left = strip_leading_stopwords(a.as_str());
        if left.is_empty() || is_stopword(b.as_str()) {
            continue;
        }
        let entity = ExtractedEntity::new(
            EntityType::Match,
            &format!("{} vs {}", left, b.as_str()),
            UNKNOWN_MATCH_CONFIDENCE,
        );
        matches.push((whole.end(), entity, (whole.start(), whole.end())));
    }
    matches
}

/// Two adjacent capitalized words not otherwise explained
fn capitalized_players(text: &str, claimed: &[(usize, usize)]) -> Vec<(usize, ExtractedEntity)> {
    let tokens = tokenize(text);
    let mut players = Vec::new();
    let mut i = 0;
    while i + 1 < tokens.len() {
        let (a, b) = (&tokens[i], &tokens[i + 1]);
        let adjacent = text[a.end..b.start].chars().all(char::is_whitespace);
        let candidate = adjacent
            && is_name_word(a.text)
            && is_name_word(b.text)
            && !overlaps_any(claimed, a.start, b.end)
            && !LEXICON.is_place(a.text)
            && !LEXICON.is_place(b.text)
            && !LEXICON.is_alias(a.text)
            && !LEXICON.is_alias(b.text);
        if candidate {
            let name = format!("{} {}", a.text, b.text);
            players.push((
                a.start,
                ExtractedEntity::new(EntityType::Player, &name, CAPITALIZED_PLAYER_CONFIDENCE),
            ));
            i += 2;
        } else {
            i += 1;
        }
    }
    players
}

fn is_name_word(word: &str) -> bool {
    let mut chars = word.chars();
    let starts_upper = chars.next().is_some_and(char::is_uppercase);
    starts_upper
        && word.chars().any(char::is_lowercase)
        && word.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-')
        && !is_stopword(word)
}

fn is_stopword(word: &str) -> bool {
    CAPITALIZED_STOPWORDS.contains(&word.to_lowercase().as_str())
}

fn strip_leading_stopwords(side: &str) -> String {
    side.split_whitespace()
        .skip_while(|w| is_stopword(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn overlaps_any(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|(s, e)| start < *e && *s < end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entity::{League, Sport};

    fn summary(text: &str) -> Vec<(EntityType, String)> {
        extract(text).into_iter().map(|e| (e.entity_type, e.name)).collect()
    }

    #[test]
    fn test_player_alias_with_sport() {
        let entities = extract("Jokic points");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].entity_type, EntityType::Player);
        assert_eq!(entities[0].name, "Nikola Jokić");
        assert_eq!(entities[0].sport, Some(Sport::Basketball));
        assert_eq!(entities[0].league, Some(League::Nba));
        assert_eq!(entities[0].confidence, PLAYER_CONFIDENCE);
    }

    #[test]
    fn test_known_match() {
        let entities = extract("Lakers vs Celtics tonight");
        assert_eq!(
            summary("Lakers vs Celtics tonight"),
            vec![
                (EntityType::Team, "Los Angeles Lakers".to_string()),
                (EntityType::Team, "Boston Celtics".to_string()),
                (EntityType::Match, "Los Angeles Lakers vs Boston Celtics".to_string()),
            ]
        );
        assert_eq!(entities[2].confidence, KNOWN_MATCH_CONFIDENCE);
        assert_eq!(entities[2].sport, Some(Sport::Basketball));
    }

    #[test]
    fn test_at_separator_requires_known_sides() {
        assert!(summary("Chiefs at Bills").iter().any(|(t, _)| *t == EntityType::Match));
        assert!(!summary("Arrived at Denver").iter().any(|(t, _)| *t == EntityType::Match));
    }

    #[test]
    fn test_place_sides_form_low_confidence_match() {
        let entities = extract("Dallas vs Chicago tonight");
        let matched: Vec<_> = entities.iter().filter(|e| e.entity_type == EntityType::Match).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Dallas vs Chicago");
        assert_eq!(matched[0].confidence, UNKNOWN_MATCH_CONFIDENCE);
    }

    #[test]
    fn test_capitalized_unknown_match() {
        let entities = extract("Who wins Sporting Gijon vs Racing Ferrol");
        let matched: Vec<_> = entities.iter().filter(|e| e.entity_type == EntityType::Match).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Sporting Gijon vs Racing Ferrol");
        assert_eq!(matched[0].confidence, UNKNOWN_MATCH_CONFIDENCE);
    }

    #[test]
    fn test_capitalized_pair_player() {
        let entities = extract("How is Kawhi Leonard playing this season?");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "Kawhi Leonard");
        assert_eq!(entities[0].confidence, CAPITALIZED_PLAYER_CONFIDENCE);
    }

    #[test]
    fn test_capitalized_pair_skips_stopwords() {
        assert!(extract("What Time is it").is_empty());
        assert!(extract("Monday Night football").is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let entities = extract("LeBron or King James?");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "LeBron James");
    }

    #[test]
    fn test_league_entity() {
        let entities = extract("NBA standings");
        assert_eq!(entities[0].entity_type, EntityType::League);
        assert_eq!(entities[0].name, "NBA");
    }

    #[test]
    fn test_no_entities() {
        assert!(extract("what are the rules").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_team_mentions() {
        let mentions = team_mentions("warriors nuggets");
        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].team.name, "Golden State Warriors");
        assert!(is_separator_gap(" - "));
        assert!(is_separator_gap(" "));
        assert!(!is_separator_gap(" and "));
    }

    #[test]
    fn test_team_like_mentions_include_nicknames() {
        let mentions = team_like_mentions("Heat vs Celtics");
        let names: Vec<_> = mentions.iter().map(|m| m.team.name).collect();
        assert_eq!(names, vec!["Miami Heat", "Boston Celtics"]);

        // the alias span wins over the nickname inside it
        let mentions = team_like_mentions("Man City vs Arsenal");
        let names: Vec<_> = mentions.iter().map(|m| m.team.name).collect();
        assert_eq!(names, vec!["Manchester City", "Arsenal"]);
    }
}
