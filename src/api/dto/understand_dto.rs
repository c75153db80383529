//! 查询理解 DTO

use serde::{Deserialize, Serialize};

/// 查询理解请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnderstandRequest {
    /// 用户问题
    pub query: String,
    /// 会话标识（用于代词消解与实验分组）
    #[serde(default)]
    pub session_id: Option<String>,
    /// 显式指定的实验分组
    #[serde(default)]
    pub variant: Option<String>,
}
