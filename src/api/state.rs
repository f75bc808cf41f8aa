use std::sync::Arc;

use crate::services::RecommendationService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecommendationService>,
    /// Page size used when a listing request has no `limit`
    pub title_list_limit: usize,
}

impl AppState {
    pub fn new(service: RecommendationService, title_list_limit: usize) -> Self {
        Self {
            service: Arc::new(service),
            title_list_limit,
        }
    }
}
