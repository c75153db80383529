//! 语言模型模块
//!
//! 外部分类服务客户端与结构化输出修复。

pub mod client;
pub mod repair;

pub use client::{HttpLlmClient, LlmClient, LlmProvider, create_llm_client};
pub use repair::{parse_response, repair};
