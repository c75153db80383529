//! 分类结果数据模型
//!
//! 封闭的意图分类表、分类结果以及对外暴露的查询理解结果。

use serde::{Deserialize, Serialize};

use crate::models::entity::{ExtractedEntity, League, Sport, clamp_confidence};
use crate::models::routing::RoutingDecision;

/// 查询意图分类（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryCategory {
    PlayerStats,
    TeamStats,
    MatchPrediction,
    MatchResult,
    LiveScore,
    Schedule,
    InjuryNews,
    BreakingNews,
    Standings,
    Lineup,
    FormCheck,
    HeadToHead,
    Transfer,
    BettingOdds,
    Historical,
    RulesExplanation,
    Greeting,
    Hypothetical,
    General,
    Unclear,
}

impl QueryCategory {
    /// 全部分类（语言模型提示词使用）
    pub const ALL: [QueryCategory; 20] = [
        QueryCategory::PlayerStats,
        QueryCategory::TeamStats,
        QueryCategory::MatchPrediction,
        QueryCategory::MatchResult,
        QueryCategory::LiveScore,
        QueryCategory::Schedule,
        QueryCategory::InjuryNews,
        QueryCategory::BreakingNews,
        QueryCategory::Standings,
        QueryCategory::Lineup,
        QueryCategory::FormCheck,
        QueryCategory::HeadToHead,
        QueryCategory::Transfer,
        QueryCategory::BettingOdds,
        QueryCategory::Historical,
        QueryCategory::RulesExplanation,
        QueryCategory::Greeting,
        QueryCategory::Hypothetical,
        QueryCategory::General,
        QueryCategory::Unclear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryCategory::PlayerStats => "PLAYER_STATS",
            QueryCategory::TeamStats => "TEAM_STATS",
            QueryCategory::MatchPrediction => "MATCH_PREDICTION",
            QueryCategory::MatchResult => "MATCH_RESULT",
            QueryCategory::LiveScore => "LIVE_SCORE",
            QueryCategory::Schedule => "SCHEDULE",
            QueryCategory::InjuryNews => "INJURY_NEWS",
            QueryCategory::BreakingNews => "BREAKING_NEWS",
            QueryCategory::Standings => "STANDINGS",
            QueryCategory::Lineup => "LINEUP",
            QueryCategory::FormCheck => "FORM_CHECK",
            QueryCategory::HeadToHead => "HEAD_TO_HEAD",
            QueryCategory::Transfer => "TRANSFER",
            QueryCategory::BettingOdds => "BETTING_ODDS",
            QueryCategory::Historical => "HISTORICAL",
            QueryCategory::RulesExplanation => "RULES_EXPLANATION",
            QueryCategory::Greeting => "GREETING",
            QueryCategory::Hypothetical => "HYPOTHETICAL",
            QueryCategory::General => "GENERAL",
            QueryCategory::Unclear => "UNCLEAR",
        }
    }

    /// 解析自由文本，接受 snake/SCREAMING/空格分隔写法；不在分类表中返回 None
    pub fn parse(value: &str) -> Option<Self> {
        let key = value
            .trim()
            .to_ascii_uppercase()
            .replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }

    /// 是否需要实时数据
    pub fn needs_realtime(&self) -> bool {
        matches!(
            self,
            QueryCategory::LiveScore
                | QueryCategory::InjuryNews
                | QueryCategory::BreakingNews
                | QueryCategory::Lineup
                | QueryCategory::Standings
                | QueryCategory::BettingOdds
                | QueryCategory::Transfer
        )
    }

    /// 是否需要数据接口
    pub fn needs_api_data(&self) -> bool {
        matches!(
            self,
            QueryCategory::PlayerStats
                | QueryCategory::TeamStats
                | QueryCategory::LiveScore
                | QueryCategory::Schedule
                | QueryCategory::MatchResult
                | QueryCategory::MatchPrediction
                | QueryCategory::Standings
                | QueryCategory::Lineup
                | QueryCategory::HeadToHead
                | QueryCategory::BettingOdds
                | QueryCategory::FormCheck
        )
    }
}

impl std::fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 产生分类结果的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationStage {
    /// 规则表匹配
    Pattern,
    /// 基于实体构成的推断
    ContextInference,
    /// 外部语言模型
    LanguageModel,
    /// 语言模型不可用时的本地降级
    KeywordFallback,
}

impl ClassificationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationStage::Pattern => "pattern",
            ClassificationStage::ContextInference => "context_inference",
            ClassificationStage::LanguageModel => "language_model",
            ClassificationStage::KeywordFallback => "keyword_fallback",
        }
    }
}

/// 分类结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 意图分类
    pub category: QueryCategory,
    /// 运动项目
    pub sport: Sport,
    /// 置信度 (0.0-1.0)
    pub confidence: f32,
    /// 抽取出的实体（已去重）
    pub entities: Vec<ExtractedEntity>,
    /// 是否需要实时数据
    pub needs_realtime: bool,
    /// 是否需要数据接口
    pub needs_api_data: bool,
    /// 是否与博彩相关
    pub is_betting_related: bool,
    /// 分类依据
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// 产生结果的阶段
    pub stage: ClassificationStage,
}

impl ClassificationResult {
    /// 以分类的默认标志创建结果
    pub fn new(
        category: QueryCategory,
        sport: Sport,
        confidence: f32,
        entities: Vec<ExtractedEntity>,
        stage: ClassificationStage,
    ) -> Self {
        Self {
            category,
            sport,
            confidence: clamp_confidence(confidence),
            entities,
            needs_realtime: category.needs_realtime(),
            needs_api_data: category.needs_api_data(),
            is_betting_related: category == QueryCategory::BettingOdds,
            reasoning: None,
            stage,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

/// 歧义候选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguityCandidate {
    /// 查询中出现的地名
    pub place: String,
    /// 候选球队
    pub team: String,
    /// 候选联赛
    pub league: League,
}

/// 查询理解结果（对外接口）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryUnderstanding {
    /// 分类结果
    #[serde(flatten)]
    pub classification: ClassificationResult,
    /// 数据源路由建议，需要澄清时为空
    pub routing: Option<RoutingDecision>,
    /// 是否存在歧义
    pub is_ambiguous: bool,
    /// 澄清问题
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarifying_question: Option<String>,
    /// 歧义候选
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<AmbiguityCandidate>,
    /// 代词消解后的查询
    pub resolved_query: String,
    /// 是否使用了对话记忆
    pub used_memory: bool,
    /// 实验分组
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohort: Option<String>,
    /// 是否命中缓存
    pub from_cache: bool,
}

impl QueryUnderstanding {
    pub fn intent(&self) -> QueryCategory {
        self.classification.category
    }

    pub fn confidence(&self) -> f32 {
        self.classification.confidence
    }

    /// 是否需要用户澄清
    pub fn needs_clarification(&self) -> bool {
        self.clarifying_question.is_some()
    }
}
