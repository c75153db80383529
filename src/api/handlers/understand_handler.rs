use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::understand_dto::UnderstandRequest, handlers::validate_query},
    error::AppError,
};

pub async fn understand(
    State(state): State<AppState>,
    Json(request): Json<UnderstandRequest>,
) -> Result<impl IntoResponse, AppError> {
    let query = validate_query(&request.query, state.max_query_length)?;
    debug!("Understanding query for session {:?}", request.session_id);

    let understanding = state
        .understanding
        .understand(query, request.session_id.as_deref(), request.variant.as_deref())
        .await;

    Ok((StatusCode::OK, Json(understanding)))
}

pub async fn clear_classification_cache(State(state): State<AppState>) -> impl IntoResponse {
    state.understanding.clear_classification_cache().await;
    StatusCode::NO_CONTENT
}
