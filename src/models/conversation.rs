//! 对话记忆数据模型
//!
//! 每个会话保留最近若干轮消息，以及每种实体类型“最近提及”的一个槽位。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::entity::{EntityType, ExtractedEntity, Sport};

/// 消息角色
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// 用户消息
    User,
    /// 助手消息
    Assistant,
}

/// 单条对话消息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMessage {
    /// 消息唯一标识
    pub id: String,
    /// 角色
    pub role: MessageRole,
    /// 消息内容（用户消息为代词消解后的文本）
    pub content: String,
    /// 该轮抽取出的实体
    #[serde(default)]
    pub entities: Vec<ExtractedEntity>,
    /// 时间戳
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(role: MessageRole, content: &str, entities: Vec<ExtractedEntity>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.to_string(),
            entities,
            timestamp: Utc::now(),
        }
    }
}

/// 会话记忆
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMemory {
    /// 会话标识
    pub session_id: String,
    /// 最近消息（最旧在前）
    pub messages: Vec<ConversationMessage>,
    /// 最近提及的球员
    pub last_player: Option<String>,
    /// 最近提及的球队
    pub last_team: Option<String>,
    /// 最近提及的比赛
    pub last_match: Option<String>,
    /// 最近涉及的运动项目
    pub last_sport: Option<Sport>,
    /// 最后更新时间
    pub last_updated: DateTime<Utc>,
}

impl ConversationMemory {
    /// 创建空的会话记忆
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            messages: Vec::new(),
            last_player: None,
            last_team: None,
            last_match: None,
            last_sport: None,
            last_updated: Utc::now(),
        }
    }

    /// 追加消息，超出上限时丢弃最旧的消息
    pub fn push_message(&mut self, message: ConversationMessage, max_messages: usize) {
        self.messages.push(message);
        if self.messages.len() > max_messages {
            let overflow = self.messages.len() - max_messages;
            self.messages.drain(..overflow);
        }
        self.last_updated = Utc::now();
    }

    /// 用本轮实体覆盖“最近提及”槽位
    ///
    /// 每种类型取本轮最后出现的实体；本轮没有出现的类型保持不变。
    pub fn remember_entities(&mut self, entities: &[ExtractedEntity]) {
        for entity in entities {
            match entity.entity_type {
                EntityType::Player => self.last_player = Some(entity.name.clone()),
                EntityType::Team => self.last_team = Some(entity.name.clone()),
                EntityType::Match => self.last_match = Some(entity.name.clone()),
                EntityType::League | EntityType::Unknown => {}
            }
        }
        if let Some(sport) = entities
            .iter()
            .rev()
            .filter_map(|e| e.sport)
            .find(|s| *s != Sport::General)
        {
            self.last_sport = Some(sport);
        }
        self.last_updated = Utc::now();
    }
}
