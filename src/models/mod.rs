//! 核心数据模型模块
//!
//! 定义查询理解引擎的核心数据结构：实体、分类结果、路由决策与对话记忆。

pub mod classification;
pub mod conversation;
pub mod entity;
pub mod routing;

pub use classification::*;
pub use conversation::*;
pub use entity::*;
pub use routing::*;
