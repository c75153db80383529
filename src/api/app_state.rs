use crate::services::QueryUnderstandingService;
use std::sync::Arc;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Query understanding engine
    pub understanding: Arc<QueryUnderstandingService>,
    /// Longest accepted query, in characters
    pub max_query_length: usize,
}

impl AppState {
    pub fn new(understanding: Arc<QueryUnderstandingService>, max_query_length: usize) -> Self {
        Self {
            understanding,
            max_query_length,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("max_query_length", &self.max_query_length)
            .finish_non_exhaustive()
    }
}
