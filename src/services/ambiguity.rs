//! Ambiguity Detector
//!
//! A query that names a place hosting teams in several leagues, with no sport
//! keyword and no dictionary team, player or league mention to narrow it down,
//! needs a clarifying question before it can be classified.

use crate::lexicon::{AliasTarget, FoldedText, LEXICON, PlaceMention};
use crate::models::classification::AmbiguityCandidate;

/// Result of an ambiguous query
#[derive(Debug, Clone, PartialEq)]
pub struct AmbiguityReport {
    /// Ambiguous places in text order
    pub places: Vec<String>,
    /// Every candidate team, grouped by place, ordered by league
    pub candidates: Vec<AmbiguityCandidate>,
    /// Question enumerating every candidate
    pub question: String,
}

/// Check a query; `None` when it is not ambiguous
pub fn detect(text: &str) -> Option<AmbiguityReport> {
    let folded = FoldedText::new(text);
    let aliases = LEXICON.find_aliases(&folded);

    let mut places: Vec<PlaceMention> = Vec::new();
    for place in LEXICON.find_places(&folded) {
        let covered = aliases.iter().any(|m| place.start < m.end && m.start < place.end);
        if !covered && !places.iter().any(|p| p.place == place.place) {
            places.push(place);
        }
    }
    if places.is_empty() {
        return None;
    }

    if LEXICON.detect_sport(&folded).is_some() {
        return None;
    }
    let narrowed = aliases.iter().any(|m| {
        matches!(
            m.value,
            AliasTarget::Team(_) | AliasTarget::Player(_) | AliasTarget::League(_)
        )
    });
    if narrowed {
        return None;
    }

    let candidates: Vec<AmbiguityCandidate> = places
        .iter()
        .flat_map(|p| {
            p.teams.iter().map(|team| AmbiguityCandidate {
                place: p.place.to_string(),
                team: team.name.to_string(),
                league: team.league,
            })
        })
        .collect();

    Some(AmbiguityReport {
        places: places.iter().map(|p| p.place.to_string()).collect(),
        question: clarifying_question(&places),
        candidates,
    })
}

fn clarifying_question(places: &[PlaceMention]) -> String {
    match places {
        [single] => format!("Which {} team do you mean: {}?", single.place, describe(single)),
        _ => {
            let options: Vec<String> = places
                .iter()
                .map(|p| format!("{}: {}", p.place, describe(p)))
                .collect();
            format!("Which teams do you mean? {}?", options.join("; "))
        }
    }
}

fn describe(place: &PlaceMention) -> String {
    let teams: Vec<String> = place
        .teams
        .iter()
        .map(|t| format!("{} ({})", t.nickname, t.league))
        .collect();
    join_options(&teams)
}

fn join_options(options: &[String]) -> String {
    match options {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entity::League;

    #[test]
    fn test_dallas_vs_chicago_is_ambiguous() {
        let report = detect("Dallas vs Chicago tonight").unwrap();
        assert_eq!(report.places, vec!["Dallas", "Chicago"]);
        let teams: Vec<(&str, League)> = report
            .candidates
            .iter()
            .map(|c| (c.team.as_str(), c.league))
            .collect();
        assert_eq!(
            teams,
            vec![
                ("Dallas Mavericks", League::Nba),
                ("Dallas Cowboys", League::Nfl),
                ("Dallas Stars", League::Nhl),
                ("Chicago Bulls", League::Nba),
                ("Chicago Bears", League::Nfl),
                ("Chicago Blackhawks", League::Nhl),
            ]
        );
        for expected in [
            "Mavericks (NBA)",
            "Cowboys (NFL)",
            "Stars (NHL)",
            "Bulls (NBA)",
            "Bears (NFL)",
            "Blackhawks (NHL)",
        ] {
            assert!(report.question.contains(expected), "{}", report.question);
        }
    }

    #[test]
    fn test_single_place_question() {
        let report = detect("how did Denver do last night").unwrap();
        assert_eq!(
            report.question,
            "Which Denver team do you mean: Nuggets (NBA), Broncos (NFL) or Avalanche (NHL)?"
        );
    }

    #[test]
    fn test_sport_keyword_disambiguates() {
        assert!(detect("Dallas vs Chicago NBA tonight").is_none());
        assert!(detect("Dallas hockey score").is_none());
    }

    #[test]
    fn test_nickname_disambiguates() {
        assert!(detect("Dallas Cowboys tonight").is_none());
        assert!(detect("Dallas vs Lakers").is_none());
    }

    #[test]
    fn test_single_league_place_is_not_ambiguous() {
        assert!(detect("Manchester derby").is_none());
        assert!(detect("Jokic points").is_none());
    }

    #[test]
    fn test_place_inside_league_name_is_ignored() {
        assert!(detect("la liga top scorer").is_none());
    }
}
