//! Keyword tables shared by the extractor, the classifiers and the router.

use crate::models::classification::QueryCategory;
use crate::models::entity::{League, Sport};

/// Sport keywords. Multi-word entries win over their single-word suffixes.
pub static SPORT_KEYWORDS: &[(&str, Sport)] = &[
    ("nba", Sport::Basketball),
    ("basketball", Sport::Basketball),
    ("hoops", Sport::Basketball),
    ("nfl", Sport::Football),
    ("american football", Sport::Football),
    ("football", Sport::Football),
    ("super bowl", Sport::Football),
    ("nhl", Sport::Hockey),
    ("hockey", Sport::Hockey),
    ("stanley cup", Sport::Hockey),
    ("mlb", Sport::Baseball),
    ("baseball", Sport::Baseball),
    ("world series", Sport::Baseball),
    ("soccer", Sport::Soccer),
    ("premier league", Sport::Soccer),
    ("epl", Sport::Soccer),
    ("la liga", Sport::Soccer),
    ("mls", Sport::Soccer),
    ("champions league", Sport::Soccer),
    ("futbol", Sport::Soccer),
];

/// League mentions extracted as LEAGUE entities
pub static LEAGUE_ALIASES: &[(&str, League)] = &[
    ("nba", League::Nba),
    ("nfl", League::Nfl),
    ("nhl", League::Nhl),
    ("mlb", League::Mlb),
    ("premier league", League::PremierLeague),
    ("epl", League::PremierLeague),
    ("la liga", League::LaLiga),
    ("mls", League::Mls),
];

/// Alternative spellings of multi-league places
pub static PLACE_ALIASES: &[(&str, &str)] = &[("la", "Los Angeles"), ("ny", "New York"), ("nyc", "New York")];

/// Tokens that separate the two sides of a match
pub static MATCH_SEPARATORS: &[&str] = &["vs", "vs.", "versus", "v", "v.", "at", "@", "-"];

/// Capitalized words that never start a player name
pub static CAPITALIZED_STOPWORDS: &[&str] = &[
    "who", "what", "when", "where", "why", "how", "which", "will", "would", "could", "should", "can",
    "did", "does", "do", "is", "are", "was", "were", "the", "a", "an", "tell", "show", "give", "any",
    "has", "have", "hey", "hi", "hello", "please", "i", "if", "me", "my", "and", "or", "in",
    "on", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "january",
    "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december", "premier", "league", "champions", "world", "cup", "super", "bowl",
    "stanley", "series", "finals", "final", "game", "match", "today", "tonight", "tomorrow",
    "mvp", "playoffs", "odds", "stats",
];

/// Words that mark a scheduling question
pub static SCHEDULE_KEYWORDS: &[&str] = &[
    "when", "next", "schedule", "tonight", "tomorrow", "today", "time", "fixture", "fixtures",
    "kickoff", "upcoming", "start", "starts",
];

/// Past-tense markers that turn a matchup into a result lookup
pub static PAST_TENSE_MARKERS: &[&str] = &[
    "won", "lost", "beat", "played", "scored", "did", "was", "were", "finished", "ended",
    "defeated", "drew", "tied", "yesterday", "last",
];

/// Betting vocabulary
pub static BETTING_KEYWORDS: &[&str] = &[
    "odds", "spread", "parlay", "moneyline", "bet", "bets", "betting", "wager", "over/under",
];

/// Keyword fallback table, scanned in order; the first keyword present wins.
pub static KEYWORD_CATEGORIES: &[(&str, QueryCategory)] = &[
    ("odds", QueryCategory::BettingOdds),
    ("bet", QueryCategory::BettingOdds),
    ("betting", QueryCategory::BettingOdds),
    ("spread", QueryCategory::BettingOdds),
    ("parlay", QueryCategory::BettingOdds),
    ("moneyline", QueryCategory::BettingOdds),
    ("injury", QueryCategory::InjuryNews),
    ("injuries", QueryCategory::InjuryNews),
    ("injured", QueryCategory::InjuryNews),
    ("hurt", QueryCategory::InjuryNews),
    ("live", QueryCategory::LiveScore),
    ("score", QueryCategory::LiveScore),
    ("lineup", QueryCategory::Lineup),
    ("lineups", QueryCategory::Lineup),
    ("starters", QueryCategory::Lineup),
    ("roster", QueryCategory::Lineup),
    ("standings", QueryCategory::Standings),
    ("table", QueryCategory::Standings),
    ("playoffs", QueryCategory::Standings),
    ("playoff", QueryCategory::Standings),
    ("rankings", QueryCategory::Standings),
    ("transfer", QueryCategory::Transfer),
    ("trade", QueryCategory::Transfer),
    ("traded", QueryCategory::Transfer),
    ("signing", QueryCategory::Transfer),
    ("contract", QueryCategory::Transfer),
    ("news", QueryCategory::BreakingNews),
    ("breaking", QueryCategory::BreakingNews),
    ("rumors", QueryCategory::BreakingNews),
    ("schedule", QueryCategory::Schedule),
    ("when", QueryCategory::Schedule),
    ("tonight", QueryCategory::Schedule),
    ("tomorrow", QueryCategory::Schedule),
    ("fixtures", QueryCategory::Schedule),
    ("won", QueryCategory::MatchResult),
    ("lost", QueryCategory::MatchResult),
    ("beat", QueryCategory::MatchResult),
    ("result", QueryCategory::MatchResult),
    ("win", QueryCategory::MatchPrediction),
    ("predict", QueryCategory::MatchPrediction),
    ("prediction", QueryCategory::MatchPrediction),
    ("favorite", QueryCategory::MatchPrediction),
    ("vs", QueryCategory::MatchPrediction),
    ("points", QueryCategory::PlayerStats),
    ("stats", QueryCategory::PlayerStats),
    ("goals", QueryCategory::PlayerStats),
    ("assists", QueryCategory::PlayerStats),
    ("rebounds", QueryCategory::PlayerStats),
    ("yards", QueryCategory::PlayerStats),
    ("record", QueryCategory::TeamStats),
    ("team", QueryCategory::TeamStats),
    ("offense", QueryCategory::TeamStats),
    ("defense", QueryCategory::TeamStats),
    ("form", QueryCategory::FormCheck),
    ("streak", QueryCategory::FormCheck),
    ("history", QueryCategory::Historical),
    ("ever", QueryCategory::Historical),
    ("legend", QueryCategory::Historical),
    ("rule", QueryCategory::RulesExplanation),
    ("rules", QueryCategory::RulesExplanation),
    ("offside", QueryCategory::RulesExplanation),
    ("explain", QueryCategory::RulesExplanation),
    ("hello", QueryCategory::Greeting),
    ("hi", QueryCategory::Greeting),
    ("hey", QueryCategory::Greeting),
    ("thanks", QueryCategory::Greeting),
    ("if", QueryCategory::Hypothetical),
    ("imagine", QueryCategory::Hypothetical),
];
