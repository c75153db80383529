//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod session_handler;
pub mod understand_handler;

pub use session_handler::*;
pub use understand_handler::*;

use crate::error::AppError;

/// 校验查询文本：去除首尾空白后非空，且不超过长度上限
pub(crate) fn validate_query(query: &str, max_length: usize) -> Result<&str, AppError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("query must not be empty".into()));
    }
    let length = trimmed.chars().count();
    if length > max_length {
        return Err(AppError::Validation(format!(
            "query is {} characters, limit is {}",
            length, max_length
        )));
    }
    Ok(trimmed)
}
