use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::session_dto::{ResolveRequest, ResolveResponse},
        handlers::validate_query,
    },
    error::AppError,
};

pub async fn resolve_pronouns(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<ResolveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let query = validate_query(&request.query, state.max_query_length)?;
    debug!("Resolving references for session {}", session_id);

    let resolution = state.understanding.resolve_pronouns(&session_id, query).await;
    Ok(Json(ResolveResponse {
        resolved_query: resolution.resolved_query,
        used_memory: resolution.used_memory,
    }))
}

pub async fn get_memory(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let memory = state
        .understanding
        .memory_snapshot(&session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {}", session_id)))?;
    Ok(Json(memory))
}

pub async fn clear_memory(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    state.understanding.clear_memory(&session_id).await;
    StatusCode::NO_CONTENT
}
