//! DTO 模块
//!
//! 数据传输对象，用于 API 请求和响应的序列化。

pub mod session_dto;
pub mod understand_dto;

pub use session_dto::*;
pub use understand_dto::*;
