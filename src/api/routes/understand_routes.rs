//! Understand Routes

use crate::api::app_state::AppState;
use crate::api::handlers::understand_handler::*;
use axum::{
    Router,
    routing::{delete, post},
};

/// 创建查询理解路由器
pub fn create_understand_router() -> Router<AppState> {
    Router::new()
        .route("/understand", post(understand))
        .route("/cache/classifications", delete(clear_classification_cache))
}
