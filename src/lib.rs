//! Courtside - 体育问答查询理解与路由引擎
//!
//! 对自由文本的体育问题进行意图分类、实体抽取、代词消解与歧义检测，
//! 并给出应当查询哪类数据源以及所需的数据新鲜度。

pub mod api;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod llm;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
