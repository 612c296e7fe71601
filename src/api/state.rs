//! Application state for shared services

use std::sync::Arc;

use crate::domain::SemanticQueryCache;
use crate::infrastructure::services::QueryService;

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    pub query_service: Arc<QueryService>,
    pub cache: Arc<dyn SemanticQueryCache>,
}

impl AppState {
    pub fn new(query_service: Arc<QueryService>, cache: Arc<dyn SemanticQueryCache>) -> Self {
        Self {
            query_service,
            cache,
        }
    }
}
