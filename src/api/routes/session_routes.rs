//! Session Routes
//!
//! 定义会话记忆相关的 API 路由。

use crate::api::app_state::AppState;
use crate::api::handlers::session_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

/// 创建会话路由器
pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/sessions/:session_id/resolve", post(resolve_pronouns))
        .route("/sessions/:session_id/memory", get(get_memory).delete(clear_memory))
}
