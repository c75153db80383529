//! 数据源路由模型

use serde::{Deserialize, Serialize};

use crate::models::entity::clamp_confidence;

/// 后端数据源类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    /// 无需外部数据
    None,
    /// 归档/参考资料
    Archival,
    /// 实时搜索
    Realtime,
    /// 混合
    Hybrid,
}

/// 数据新鲜度要求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recency {
    Hour,
    Day,
    Week,
    Month,
}

/// 路由决策
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// 数据源
    pub source: DataSource,
    /// 新鲜度
    pub recency: Recency,
    /// 置信度 (0.0-1.0)
    pub confidence: f32,
    /// 决策原因（非空）
    pub reason: String,
}

impl RoutingDecision {
    pub fn new(source: DataSource, recency: Recency, confidence: f32, reason: &str) -> Self {
        let reason = reason.trim();
        Self {
            source,
            recency,
            confidence: clamp_confidence(confidence),
            reason: if reason.is_empty() {
                "no reason recorded".to_string()
            } else {
                reason.to_string()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_never_empty() {
        let decision = RoutingDecision::new(DataSource::Realtime, Recency::Week, 0.6, "  ");
        assert!(!decision.reason.is_empty());
    }

    #[test]
    fn test_serialization() {
        let decision = RoutingDecision::new(DataSource::Archival, Recency::Month, 0.85, "career record");
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["source"], "ARCHIVAL");
        assert_eq!(json["recency"], "month");
    }
}
