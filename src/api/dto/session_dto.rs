//! 会话 DTO
//!
//! 代词消解的请求和响应数据结构。

use serde::{Deserialize, Serialize};

/// 代词消解请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// 待消解的问题
    pub query: String,
}

/// 代词消解响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    /// 消解后的问题
    pub resolved_query: String,
    /// 是否使用了对话记忆
    pub used_memory: bool,
}
