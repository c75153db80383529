//! Intent rule table
//!
//! Declarative `(category, priority, patterns)` records. Patterns are matched
//! against lowercased, diacritic-folded text with collapsed whitespace. The
//! table is compiled once and never mutated.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::models::classification::QueryCategory;

/// One rule of the table
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub category: QueryCategory,
    pub priority: u8,
    pub patterns: &'static [&'static str],
}

/// A rule with compiled patterns
#[derive(Debug)]
pub struct CompiledRule {
    pub category: QueryCategory,
    pub priority: u8,
    patterns: Vec<Regex>,
}

impl CompiledRule {
    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

pub static INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        category: QueryCategory::Greeting,
        priority: 95,
        patterns: &[
            r"^(hi|hello|hey|yo|howdy)( there| all| everyone)?[\s!.,?]*$",
            r"^good (morning|afternoon|evening)[\s!.,?]*$",
            r"^(thanks|thank you)( so much| a lot)?[\s!.,?]*$",
        ],
    },
    IntentRule {
        category: QueryCategory::LiveScore,
        priority: 90,
        patterns: &[
            r"\blive\b",
            r"\b(current|latest) score\b",
            r"\bwhat'?s the score\b",
            r"\bwho'?s winning\b",
            r"\bscore right now\b",
        ],
    },
    IntentRule {
        category: QueryCategory::InjuryNews,
        priority: 88,
        patterns: &[
            r"\binjur(y|ies|ed)\b",
            r"\bhurt\b",
            r"\bsidelined\b",
            r"\b(day-to-day|questionable|ruled out)\b",
        ],
    },
    IntentRule {
        category: QueryCategory::Lineup,
        priority: 85,
        patterns: &[
            r"\bline-?ups?\b",
            r"\bstarting (five|xi|11)\b",
            r"\bwho('s| is) starting\b",
            r"\bstarters\b",
        ],
    },
    IntentRule {
        category: QueryCategory::BettingOdds,
        priority: 84,
        patterns: &[
            r"\bodds\b",
            r"\bspread\b",
            r"\bparlay\b",
            r"\bmoneyline\b",
            r"\bover/under\b",
            r"\b(bet|bets|betting|wager)\b",
        ],
    },
    IntentRule {
        category: QueryCategory::BreakingNews,
        priority: 82,
        patterns: &[
            r"\bbreaking\b",
            r"\b(latest|recent) news\b",
            r"\bnews (on|about)\b",
            r"\brumou?rs?\b",
            r"\bfired\b",
        ],
    },
    IntentRule {
        category: QueryCategory::Transfer,
        priority: 80,
        patterns: &[
            r"\btransfers?\b",
            r"\btraded?\b",
            r"\bsign(ed|ing|s)\b",
            r"\bfree agen(t|cy)\b",
        ],
    },
    IntentRule {
        category: QueryCategory::Standings,
        priority: 78,
        patterns: &[
            r"\bstandings\b",
            r"\bleague table\b",
            r"\bplayoff (picture|race|seeding)\b",
            r"\bconference rankings?\b",
            r"\bwho('s| is) (first|top) in\b",
        ],
    },
    IntentRule {
        category: QueryCategory::Schedule,
        priority: 75,
        patterns: &[
            r"\bwhen (is|are|do|does)\b",
            r"\bschedule\b",
            r"\bnext (game|match|fixture)\b",
            r"\bwhat time\b",
            r"\bfixtures?\b",
            r"\bkick-?off\b",
        ],
    },
    IntentRule {
        category: QueryCategory::MatchPrediction,
        priority: 72,
        patterns: &[
            r"\bwho (will|would|is going to) win\b",
            r"\bwho wins\b",
            r"\bpredict(ion|ions)?\b",
            r"\bfavou?rites? to win\b",
            r"\bwill .+ (win|beat)\b",
        ],
    },
    IntentRule {
        category: QueryCategory::MatchResult,
        priority: 70,
        patterns: &[
            r"\bwho won\b",
            r"\bfinal score\b",
            r"\bdid .+ (win|lose)\b",
            r"\bresults?\b",
        ],
    },
    IntentRule {
        category: QueryCategory::HeadToHead,
        priority: 68,
        patterns: &[
            r"\bhead[- ]to[- ]head\b",
            r"\bh2h\b",
            r"\brecord (against|vs)\b",
            r"\bhistory (between|against)\b",
        ],
    },
    IntentRule {
        category: QueryCategory::Historical,
        priority: 65,
        patterns: &[
            r"\ball[- ]time\b",
            r"\bhistory\b",
            r"\bever\b",
            r"\bhall of fame\b",
            r"\b(greatest|goat)\b",
            r"\bcareer\b",
            r"\bborn\b",
            r"\bin (19|20)\d\d\b",
        ],
    },
    IntentRule {
        category: QueryCategory::PlayerStats,
        priority: 60,
        patterns: &[
            r"\bstats?\b",
            r"\bpoints\b",
            r"\bppg\b",
            r"\brebounds\b",
            r"\bassists\b",
            r"\bgoals\b",
            r"\btouchdowns?\b",
            r"\byards\b",
            r"\bhome runs?\b",
            r"\baverag(e|es|ing)\b",
            r"\bhow many\b",
        ],
    },
    IntentRule {
        category: QueryCategory::TeamStats,
        priority: 58,
        patterns: &[
            r"\bteam stats\b",
            r"\brecord\b",
            r"\b(offensive|defensive) (rating|ranking)\b",
            r"\bwin-loss\b",
        ],
    },
    IntentRule {
        category: QueryCategory::FormCheck,
        priority: 55,
        patterns: &[
            r"\bform\b",
            r"\bstreak\b",
            r"\bhow (is|are) .+ (doing|playing)\b",
            r"\blast (five|5|ten|10) games\b",
        ],
    },
    IntentRule {
        category: QueryCategory::RulesExplanation,
        priority: 50,
        patterns: &[
            r"\brules?\b",
            r"\bexplain\b",
            r"\boffside\b",
            r"\bwhat does .+ mean\b",
            r"\bhow does .+ work\b",
        ],
    },
    IntentRule {
        category: QueryCategory::Hypothetical,
        priority: 45,
        patterns: &[
            r"^what if\b",
            r"\bwhat would happen if\b",
            r"\bimagine\b",
            r"\bif .+ (had|were|was)\b",
        ],
    },
];

/// Compiled rule table, in table order
pub static COMPILED_RULES: Lazy<Vec<CompiledRule>> = Lazy::new(|| compile(INTENT_RULES));

/// Compile a table; invalid patterns are skipped with a warning
pub fn compile(rules: &[IntentRule]) -> Vec<CompiledRule> {
    rules
        .iter()
        .map(|rule| CompiledRule {
            category: rule.category,
            priority: rule.priority,
            patterns: rule
                .patterns
                .iter()
                .filter_map(|source| match Regex::new(source) {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        warn!("Skipping invalid {} pattern {:?}: {}", rule.category, source, e);
                        None
                    }
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_compiles() {
        for (rule, compiled) in INTENT_RULES.iter().zip(COMPILED_RULES.iter()) {
            assert_eq!(rule.patterns.len(), compiled.patterns.len(), "{}", rule.category);
        }
    }

    #[test]
    fn test_priorities_are_unique() {
        let mut priorities: Vec<u8> = INTENT_RULES.iter().map(|r| r.priority).collect();
        priorities.sort_unstable();
        priorities.dedup();
        assert_eq!(priorities.len(), INTENT_RULES.len());
    }

    #[test]
    fn test_playoffs_alone_is_not_standings() {
        let standings = COMPILED_RULES
            .iter()
            .find(|r| r.category == QueryCategory::Standings)
            .unwrap();
        assert!(!standings.is_match("thoughts on the playoffs"));
        assert!(standings.is_match("what does the playoff picture look like"));
    }

    #[test]
    fn test_greeting_only_matches_bare_greetings() {
        let greeting = COMPILED_RULES
            .iter()
            .find(|r| r.category == QueryCategory::Greeting)
            .unwrap();
        for text in ["hi", "hello there!", "hey, ", "good morning.", "thanks a lot!"] {
            assert!(greeting.is_match(text), "{}", text);
        }
        for text in ["hi, what's the score right now?", "hey, who won the lakers game last night?", "thanks, is lebron injured?"] {
            assert!(!greeting.is_match(text), "{}", text);
        }
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let rules = [IntentRule {
            category: QueryCategory::General,
            priority: 1,
            patterns: &["(unclosed", r"\bok\b"],
        }];
        let compiled = compile(&rules);
        assert_eq!(compiled[0].patterns.len(), 1);
        assert!(compiled[0].is_match("ok then"));
    }
}
