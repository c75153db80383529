//! 实体数据模型
//!
//! 从查询文本中抽取出的球员、球队、比赛与联赛引用。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 实体类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// 球员
    Player,
    /// 球队
    Team,
    /// 比赛（两队对阵）
    Match,
    /// 联赛
    League,
    /// 未知
    Unknown,
}

impl EntityType {
    /// 宽松解析（大小写不敏感），无法识别时返回 Unknown
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "player" | "athlete" => EntityType::Player,
            "team" | "club" => EntityType::Team,
            "match" | "game" | "fixture" => EntityType::Match,
            "league" | "competition" => EntityType::League,
            _ => EntityType::Unknown,
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Player => write!(f, "PLAYER"),
            EntityType::Team => write!(f, "TEAM"),
            EntityType::Match => write!(f, "MATCH"),
            EntityType::League => write!(f, "LEAGUE"),
            EntityType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// 运动项目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Basketball,
    Football,
    Hockey,
    Baseball,
    Soccer,
    /// 未指定或无法判断
    #[default]
    General,
}

impl Sport {
    /// 全部取值（用于语言模型提示词中的分类表）
    pub const ALL: [Sport; 6] = [
        Sport::Basketball,
        Sport::Football,
        Sport::Hockey,
        Sport::Baseball,
        Sport::Soccer,
        Sport::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Basketball => "basketball",
            Sport::Football => "football",
            Sport::Hockey => "hockey",
            Sport::Baseball => "baseball",
            Sport::Soccer => "soccer",
            Sport::General => "general",
        }
    }

    /// 严格解析，不在分类表中的值返回 None
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basketball" | "nba" => Some(Sport::Basketball),
            "football" | "american football" | "nfl" => Some(Sport::Football),
            "hockey" | "ice hockey" | "nhl" => Some(Sport::Hockey),
            "baseball" | "mlb" => Some(Sport::Baseball),
            "soccer" | "association football" => Some(Sport::Soccer),
            "general" | "none" | "" => Some(Sport::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 联赛
///
/// 声明顺序即候选列表的排序顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum League {
    #[serde(rename = "NBA")]
    Nba,
    #[serde(rename = "NFL")]
    Nfl,
    #[serde(rename = "NHL")]
    Nhl,
    #[serde(rename = "MLB")]
    Mlb,
    #[serde(rename = "Premier League")]
    PremierLeague,
    #[serde(rename = "La Liga")]
    LaLiga,
    #[serde(rename = "MLS")]
    Mls,
}

impl League {
    pub fn as_str(&self) -> &'static str {
        match self {
            League::Nba => "NBA",
            League::Nfl => "NFL",
            League::Nhl => "NHL",
            League::Mlb => "MLB",
            League::PremierLeague => "Premier League",
            League::LaLiga => "La Liga",
            League::Mls => "MLS",
        }
    }

    pub fn sport(&self) -> Sport {
        match self {
            League::Nba => Sport::Basketball,
            League::Nfl => Sport::Football,
            League::Nhl => Sport::Hockey,
            League::Mlb => Sport::Baseball,
            League::PremierLeague | League::LaLiga | League::Mls => Sport::Soccer,
        }
    }
}

impl std::fmt::Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 抽取出的实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    /// 实体类型
    #[serde(rename = "type")]
    pub entity_type: EntityType,

    /// 规范名称
    pub name: String,

    /// 置信度 (0.0-1.0)
    pub confidence: f32,

    /// 所属运动项目
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<Sport>,

    /// 所属联赛
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<League>,
}

impl ExtractedEntity {
    /// 创建新实体，置信度被限制在 [0, 1]
    pub fn new(entity_type: EntityType, name: &str, confidence: f32) -> Self {
        Self {
            entity_type,
            name: name.trim().to_string(),
            confidence: clamp_confidence(confidence),
            sport: None,
            league: None,
        }
    }

    pub fn with_sport(mut self, sport: Sport) -> Self {
        self.sport = Some(sport);
        self
    }

    pub fn with_league(mut self, league: League) -> Self {
        self.league = Some(league);
        self.sport = Some(league.sport());
        self
    }

    /// 去重键
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// 将置信度限制在 [0, 1]，NaN 视为 0
pub fn clamp_confidence(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// 折叠常见的变音符号
pub fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
            'ć' | 'č' | 'ç' => 'c',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ñ' | 'ń' => 'n',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
            'š' | 'ś' => 's',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ž' | 'ź' | 'ż' => 'z',
            'đ' => 'd',
            other => other,
        })
        .collect()
}

/// 规范化名称：小写、折叠变音符号、合并空白
pub fn normalize_name(name: &str) -> String {
    fold_diacritics(&name.to_lowercase())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 合并实体列表，按规范化名称去重（保留先出现者）
pub fn merge_entities(
    primary: Vec<ExtractedEntity>,
    secondary: Vec<ExtractedEntity>,
) -> Vec<ExtractedEntity> {
    let mut seen = HashSet::new();
    primary
        .into_iter()
        .chain(secondary)
        .filter(|e| !e.name.is_empty() && seen.insert(e.normalized_name()))
        .collect()
}
