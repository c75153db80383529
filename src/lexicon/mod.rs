//! 只读词典
//!
//! 球员、球队、联赛别名与关键词表。启动时构建一次，之后只读，不需要同步。
//!
//! 匹配规则：大小写不敏感、按词边界、折叠变音符号；重叠时最长别名优先，
//! 等长时位置靠前者优先；结果按文本顺序返回。

pub mod keywords;
pub mod players;
pub mod teams;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::models::entity::{League, Sport, fold_diacritics, normalize_name};

pub use players::{PLAYERS, PlayerRecord};
pub use teams::{TEAMS, TeamRecord};

/// 全局词典实例
pub static LEXICON: Lazy<Lexicon> = Lazy::new(Lexicon::build);

/// 别名指向的对象
#[derive(Debug, Clone, Copy)]
pub enum AliasTarget {
    Player(&'static PlayerRecord),
    Team(&'static TeamRecord),
    League(League),
}

/// 一次词典命中，`start`/`end` 为原文中的字节位置
#[derive(Debug, Clone, Copy)]
pub struct TermMatch<T> {
    pub start: usize,
    pub end: usize,
    pub value: T,
}

/// 一个多联赛地名的命中
#[derive(Debug, Clone)]
pub struct PlaceMention {
    pub start: usize,
    pub end: usize,
    /// 规范地名
    pub place: &'static str,
    /// 该地所有球队，按联赛、名称排序
    pub teams: Vec<&'static TeamRecord>,
}

/// 小写并折叠后的文本，保留到原文字节位置的映射
#[derive(Debug, Clone)]
pub struct FoldedText {
    folded: String,
    offsets: Vec<usize>,
    original_len: usize,
}

impl FoldedText {
    pub fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len());
        let mut buf = [0u8; 4];
        for (index, ch) in text.char_indices() {
            for lower in ch.to_lowercase() {
                let piece = fold_diacritics(lower.encode_utf8(&mut buf));
                folded.push_str(&piece);
                offsets.extend(std::iter::repeat(index).take(piece.len()));
            }
        }
        Self {
            folded,
            offsets,
            original_len: text.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// 折叠文本位置 → 原文位置
    fn original_offset(&self, folded_offset: usize) -> usize {
        self.offsets
            .get(folded_offset)
            .copied()
            .unwrap_or(self.original_len)
    }

    /// 在折叠文本中按词边界查找词条
    ///
    /// 所有出现位置先按（长度降序、位置升序）排序，再贪心地接受不重叠的命中。
    pub fn find_terms<T: Copy>(&self, terms: &[(String, T)]) -> Vec<TermMatch<T>> {
        let hay = self.folded.as_str();
        let mut occurrences: Vec<(usize, usize, T)> = Vec::new();
        for (term, value) in terms {
            if term.is_empty() {
                continue;
            }
            for (pos, _) in hay.match_indices(term.as_str()) {
                let end = pos + term.len();
                if is_word_boundary(hay, pos, end) {
                    occurrences.push((pos, end, *value));
                }
            }
        }
        occurrences.sort_by(|a, b| (b.1 - b.0).cmp(&(a.1 - a.0)).then(a.0.cmp(&b.0)));

        let mut taken: Vec<(usize, usize)> = Vec::new();
        let mut matches = Vec::new();
        for (start, end, value) in occurrences {
            if taken.iter().any(|(s, e)| start < *e && *s < end) {
                continue;
            }
            taken.push((start, end));
            matches.push(TermMatch {
                start: self.original_offset(start),
                end: self.original_offset(end),
                value,
            });
        }
        matches.sort_by_key(|m| m.start);
        matches
    }

    /// 是否包含某个词（按词边界）
    pub fn contains_word(&self, word: &str) -> bool {
        let hay = self.folded.as_str();
        hay.match_indices(word)
            .any(|(pos, _)| is_word_boundary(hay, pos, pos + word.len()))
    }
}

fn is_word_boundary(hay: &str, start: usize, end: usize) -> bool {
    let before = hay[..start].chars().next_back();
    let after = hay[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// 词典
pub struct Lexicon {
    aliases: Vec<(String, AliasTarget)>,
    places: Vec<(String, &'static str)>,
    place_teams: BTreeMap<&'static str, Vec<&'static TeamRecord>>,
    nicknames: Vec<(String, &'static TeamRecord)>,
    sport_keywords: Vec<(String, Sport)>,
}

impl Lexicon {
    fn build() -> Self {
        let mut aliases: Vec<(String, AliasTarget)> = Vec::new();
        for player in PLAYERS {
            aliases.push((normalize_name(player.name), AliasTarget::Player(player)));
            for alias in player.aliases {
                aliases.push((normalize_name(alias), AliasTarget::Player(player)));
            }
        }
        for team in TEAMS {
            aliases.push((normalize_name(team.name), AliasTarget::Team(team)));
            for alias in team.aliases {
                aliases.push((normalize_name(alias), AliasTarget::Team(team)));
            }
        }
        for (alias, league) in keywords::LEAGUE_ALIASES {
            aliases.push((normalize_name(alias), AliasTarget::League(*league)));
        }
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(&b.0)));
        aliases.dedup_by(|a, b| a.0 == b.0);

        let mut by_place: BTreeMap<&'static str, Vec<&'static TeamRecord>> = BTreeMap::new();
        for team in TEAMS {
            by_place.entry(team.place).or_default().push(team);
        }
        let place_teams: BTreeMap<_, _> = by_place
            .into_iter()
            .filter(|(_, teams)| {
                let first = teams[0].league;
                teams.iter().any(|t| t.league != first)
            })
            .map(|(place, mut teams)| {
                teams.sort_by(|a, b| a.league.cmp(&b.league).then(a.name.cmp(b.name)));
                (place, teams)
            })
            .collect();

        let mut places: Vec<(String, &'static str)> = place_teams
            .keys()
            .map(|place| (normalize_name(place), *place))
            .collect();
        for (alias, place) in keywords::PLACE_ALIASES {
            if let Some((canonical, _)) = place_teams.get_key_value(place) {
                places.push((normalize_name(alias), *canonical));
            }
        }

        // 未作为别名收录的昵称（Heat、Giants、Kings……）
        let nicknames = TEAMS
            .iter()
            .map(|team| (normalize_name(team.nickname), team))
            .filter(|(nickname, _)| !aliases.iter().any(|(alias, _)| alias == nickname))
            .collect();

        let sport_keywords = keywords::SPORT_KEYWORDS
            .iter()
            .map(|(keyword, sport)| (normalize_name(keyword), *sport))
            .collect();

        Self {
            aliases,
            places,
            place_teams,
            nicknames,
            sport_keywords,
        }
    }

    /// 查找所有别名命中（按文本顺序）
    pub fn find_aliases(&self, text: &FoldedText) -> Vec<TermMatch<AliasTarget>> {
        text.find_terms(&self.aliases)
    }

    /// 查找多联赛地名
    pub fn find_places(&self, text: &FoldedText) -> Vec<PlaceMention> {
        text.find_terms(&self.places)
            .into_iter()
            .map(|m| PlaceMention {
                start: m.start,
                end: m.end,
                place: m.value,
                teams: self.place_teams.get(m.value).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// 查找首字母大写的球队昵称（不含已收录为别名的昵称）
    ///
    /// 小写的 `heat`、`stars` 之类是普通词，不算命中。
    pub fn find_nicknames(&self, text: &str) -> Vec<TermMatch<&'static TeamRecord>> {
        FoldedText::new(text)
            .find_terms(&self.nicknames)
            .into_iter()
            .filter(|m| text[m.start..].chars().next().is_some_and(char::is_uppercase))
            .collect()
    }

    /// 文本中最先出现的运动项目关键词
    pub fn detect_sport(&self, text: &FoldedText) -> Option<Sport> {
        text.find_terms(&self.sport_keywords)
            .first()
            .map(|m| m.value)
    }

    /// 是否是某个多联赛地名（含别写）
    pub fn is_place(&self, word: &str) -> bool {
        let key = normalize_name(word);
        self.places.iter().any(|(place, _)| *place == key)
    }

    /// 是否是已知别名
    pub fn is_alias(&self, word: &str) -> bool {
        let key = normalize_name(word);
        self.aliases.iter().any(|(alias, _)| *alias == key)
    }

    /// 按名称或别名查找球员
    pub fn player(&self, name: &str) -> Option<&'static PlayerRecord> {
        let key = normalize_name(name);
        self.aliases.iter().find_map(|(alias, target)| match target {
            AliasTarget::Player(p) if *alias == key => Some(*p),
            _ => None,
        })
    }

    /// 按名称或别名查找球队
    pub fn team(&self, name: &str) -> Option<&'static TeamRecord> {
        let key = normalize_name(name);
        self.aliases.iter().find_map(|(alias, target)| match target {
            AliasTarget::Team(t) if *alias == key => Some(*t),
            _ => None,
        })
    }

    /// 多联赛地名表：地名 → 球队
    pub fn ambiguous_places(&self) -> &BTreeMap<&'static str, Vec<&'static TeamRecord>> {
        &self.place_teams
    }
}

/// 文本中的一个词元（原文字节位置）
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// 按空白切分并去掉首尾标点；单独的 `-`、`@` 保留为词元
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    for raw in text.split_whitespace() {
        let start = offset + text[offset..].find(raw).unwrap_or(0);
        offset = start + raw.len();
        if raw == "-" || raw == "@" {
            tokens.push(Token { start, end: offset, text: raw });
            continue;
        }
        let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if trimmed.is_empty() {
            continue;
        }
        let lead = raw.find(trimmed).unwrap_or(0);
        tokens.push(Token {
            start: start + lead,
            end: start + lead + trimmed.len(),
            text: trimmed,
        });
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias_names(text: &str) -> Vec<&'static str> {
        LEXICON
            .find_aliases(&FoldedText::new(text))
            .into_iter()
            .map(|m| match m.value {
                AliasTarget::Player(p) => p.name,
                AliasTarget::Team(t) => t.name,
                AliasTarget::League(l) => l.as_str(),
            })
            .collect()
    }

    #[test]
    fn test_diacritic_folding_matches_alias() {
        assert_eq!(alias_names("Jokić triple double"), vec!["Nikola Jokić"]);
        assert_eq!(alias_names("jokic points"), vec!["Nikola Jokić"]);
    }

    #[test]
    fn test_longest_alias_wins() {
        assert_eq!(alias_names("Steph Curry tonight"), vec!["Stephen Curry"]);
        assert_eq!(alias_names("la lakers and LA Kings"), vec!["Los Angeles Lakers", "Los Angeles Kings"]);
    }

    #[test]
    fn test_word_boundaries() {
        assert!(alias_names("the bullseye").is_empty());
        assert_eq!(alias_names("Bulls, Bears."), vec!["Chicago Bulls", "Chicago Bears"]);
    }

    #[test]
    fn test_match_offsets_refer_to_original_text() {
        let text = "Dončić vs Mavs";
        let matches = LEXICON.find_aliases(&FoldedText::new(text));
        assert_eq!(&text[matches[0].start..matches[0].end], "Dončić");
        assert_eq!(&text[matches[1].start..matches[1].end], "Mavs");
    }

    #[test]
    fn test_multi_league_places() {
        let places = LEXICON.ambiguous_places();
        let dallas: Vec<_> = places["Dallas"].iter().map(|t| t.name).collect();
        assert_eq!(dallas, vec!["Dallas Mavericks", "Dallas Cowboys", "Dallas Stars"]);
        let chicago: Vec<_> = places["Chicago"].iter().map(|t| t.name).collect();
        assert_eq!(chicago, vec!["Chicago Bulls", "Chicago Bears", "Chicago Blackhawks"]);
        assert!(!places.contains_key("Manchester"));
        assert!(!LEXICON.is_alias("dallas"));
    }

    #[test]
    fn test_detect_sport_prefers_longer_keyword() {
        assert_eq!(
            LEXICON.detect_sport(&FoldedText::new("american football tonight")),
            Some(Sport::Football)
        );
        assert_eq!(LEXICON.detect_sport(&FoldedText::new("Premier League table")), Some(Sport::Soccer));
        assert_eq!(LEXICON.detect_sport(&FoldedText::new("who wins")), None);
    }

    #[test]
    fn test_capitalized_nicknames() {
        let names: Vec<_> = LEXICON
            .find_nicknames("Heat vs Celtics, Kings at Stars")
            .into_iter()
            .map(|m| m.value.name)
            .collect();
        assert_eq!(names, vec!["Miami Heat", "Los Angeles Kings", "Dallas Stars"]);
        assert!(LEXICON.find_nicknames("feeling the heat under the stars").is_empty());
        // already an alias, found by find_aliases instead
        assert!(LEXICON.find_nicknames("Lakers").is_empty());
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<_> = tokenize("Celtics - Knicks?").into_iter().map(|t| t.text).collect();
        assert_eq!(tokens, vec!["Celtics", "-", "Knicks"]);
    }
}
