//! Request handlers for the query endpoints

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{
    AddRequest, ApiError, AskRequest, DeleteRequest, DeleteResponse, ExecuteRequest,
};
use crate::domain::{CacheEntry, ResponsePayload};

/// Resolve a question (cache first, generation fallback), execute it and
/// return rows with provenance
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<ResponsePayload>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::bad_request("question must not be empty"));
    }

    info!("The user question: {}", request.question);

    let payload = state.query_service.ask(&request.question).await?;

    Ok(Json(payload))
}

/// Execute a caller-supplied query verbatim
pub async fn execute(
    State(state): State<AppState>,
    Json(request): Json<ExecuteRequest>,
) -> Result<Json<ResponsePayload>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::bad_request("query must not be empty"));
    }

    info!("The user's query: {}", request.query);

    let payload = state.query_service.execute_manual(&request.query).await?;

    Ok(Json(payload))
}

/// Generate a query for the question without consulting the cache, then
/// execute it
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<ResponsePayload>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::bad_request("question must not be empty"));
    }

    info!("The question to generate a query for: {}", request.question);

    let payload = state.query_service.generate_and_run(&request.question).await?;

    Ok(Json(payload))
}

/// Speculatively insert a question/query pair into the cache
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddRequest>,
) -> Result<StatusCode, ApiError> {
    if request.question.trim().is_empty() || request.query.trim().is_empty() {
        return Err(ApiError::bad_request("question and query must not be empty"));
    }

    info!(
        "New question-query pair to add: {} - {}",
        request.question, request.query
    );

    state
        .cache
        .insert(CacheEntry::new(request.question, request.query))
        .await?;

    Ok(StatusCode::CREATED)
}

/// Evict every cache entry matching the query text
pub async fn delete(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::bad_request("query must not be empty"));
    }

    info!("Deleting all pairs with this query: {}", request.query);

    let deleted = state.cache.delete_by_query(&request.query).await?;

    Ok(Json(DeleteResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::execution::mock::ScriptedExecutor;
    use crate::domain::generation::mock::MockQueryGenerator;
    use crate::domain::value::{Row, SqlValue};
    use crate::domain::{
        QueryResolver, QuerySource, ResultAssembler, SchemaSnapshot, SemanticCacheConfig,
    };
    use crate::infrastructure::services::QueryService;
    use crate::infrastructure::vector::InMemoryQueryCache;

    fn state(generator: MockQueryGenerator, executor: ScriptedExecutor) -> AppState {
        let cache: Arc<dyn crate::domain::SemanticQueryCache> =
            Arc::new(InMemoryQueryCache::new(&SemanticCacheConfig::default()));
        let executor: Arc<dyn crate::domain::QueryExecutor> = Arc::new(executor);

        let resolver = QueryResolver::new(
            cache.clone(),
            Arc::new(generator),
            Arc::new(SchemaSnapshot::empty()),
            "sqlite3",
        );
        let service = QueryService::new(resolver, executor, ResultAssembler::new(cache.clone()));

        AppState::new(Arc::new(service), cache)
    }

    fn count_row() -> Row {
        let mut row = Row::new();
        row.insert("count".to_string(), SqlValue::Integer(2));
        row
    }

    #[tokio::test]
    async fn test_ask_generates_executes_and_caches() {
        let generator = MockQueryGenerator::new().with_response("SELECT COUNT(*) FROM users;");
        let executor =
            ScriptedExecutor::new().with_rows("SELECT COUNT(*) FROM users;", vec![count_row()]);
        let state = state(generator, executor);

        let Json(payload) = ask(
            State(state.clone()),
            Json(AskRequest {
                question: "How many users are there?".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(payload.source, QuerySource::Generated);
        assert_eq!(payload.query, "SELECT COUNT(*) FROM users;");

        // The validated pair landed in the cache: the same question now
        // resolves from cache
        let Json(payload) = ask(
            State(state),
            Json(AskRequest {
                question: "How many users are there?".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(payload.source, QuerySource::Cache);
    }

    #[tokio::test]
    async fn test_ask_rejects_empty_question() {
        let state = state(MockQueryGenerator::new(), ScriptedExecutor::new());

        let err = ask(
            State(state),
            Json(AskRequest {
                question: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ask_evicts_bad_cached_query() {
        let generator = MockQueryGenerator::new().with_response("SELECT 1;");
        let executor = ScriptedExecutor::new()
            .with_error("SELECT * FROM gone;", "no such table: gone")
            .with_rows("SELECT 1;", vec![]);
        let state = state(generator, executor);

        // Seed a bad entry directly
        state
            .cache
            .insert(CacheEntry::new("show gone", "SELECT * FROM gone;"))
            .await
            .unwrap();

        let err = ask(
            State(state.clone()),
            Json(AskRequest {
                question: "show gone".to_string(),
            }),
        )
        .await
        .unwrap_err();

        // The caller sees the execution failure
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.response.error.message.contains("no such table: gone"));

        // The purged entry is never served again; the next ask generates
        let Json(payload) = ask(
            State(state),
            Json(AskRequest {
                question: "show gone".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(payload.source, QuerySource::Generated);
    }

    #[tokio::test]
    async fn test_execute_returns_manual_source() {
        let executor = ScriptedExecutor::new().with_rows("SELECT 1;", vec![count_row()]);
        let state = state(MockQueryGenerator::new(), executor);

        let Json(payload) = execute(
            State(state),
            Json(ExecuteRequest {
                query: "SELECT 1;".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(payload.source, QuerySource::Manual);
        assert_eq!(payload.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_empty_result_is_ok() {
        let executor = ScriptedExecutor::new().with_rows("SELECT * FROM empty_table;", vec![]);
        let state = state(MockQueryGenerator::new(), executor);

        let Json(payload) = execute(
            State(state),
            Json(ExecuteRequest {
                query: "SELECT * FROM empty_table;".to_string(),
            }),
        )
        .await
        .unwrap();

        assert!(payload.rows.is_empty());
    }

    #[tokio::test]
    async fn test_add_then_delete_round_trip() {
        let state = state(MockQueryGenerator::new(), ScriptedExecutor::new());

        let status = add(
            State(state.clone()),
            Json(AddRequest {
                question: "ping".to_string(),
                query: "SELECT 1;".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);

        let Json(response) = delete(
            State(state.clone()),
            Json(DeleteRequest {
                query: "SELECT 1;".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.deleted, 1);

        // Deleting again matches nothing and still succeeds
        let Json(response) = delete(
            State(state),
            Json(DeleteRequest {
                query: "SELECT 1;".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.deleted, 0);
    }
}
