//! Natural Language Query Gateway
//!
//! Translates natural-language questions into executable database
//! queries, runs them and returns structured results. Resolution is
//! cache first: previously answered questions live in a vector index and
//! new questions are matched by semantic similarity before falling back
//! to LLM generation. A generated query that executes successfully is
//! persisted; a cached query that fails execution is evicted before the
//! error surfaces.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::AppState;
use domain::{
    DomainError, QueryExecutor, QueryGenerator, QueryResolver, ResultAssembler,
    SemanticQueryCache,
};
use infrastructure::database::SqlxQueryExecutor;
use infrastructure::generation::OpenAiGenerator;
use infrastructure::http_client::HttpClient;
use infrastructure::services::{QueryService, SchemaService};
use infrastructure::vector::WeaviateQueryCache;

/// Wire up the application state from configuration
///
/// Connects to the target database, builds the LLM and vector index
/// adapters and loads the schema snapshot once; the snapshot is immutable
/// for the lifetime of the process.
pub async fn bootstrap(config: &AppConfig) -> Result<AppState, DomainError> {
    let executor: Arc<dyn QueryExecutor> = Arc::new(
        SqlxQueryExecutor::connect(&config.database.url, config.database.max_connections).await?,
    );

    let generator: Arc<dyn QueryGenerator> = {
        let client = HttpClient::new();
        let generator = match &config.llm.base_url {
            Some(base_url) => {
                OpenAiGenerator::with_base_url(client, config.llm.api_key.as_str(), base_url.as_str())
            }
            None => OpenAiGenerator::new(client, config.llm.api_key.as_str()),
        };

        Arc::new(generator.with_model(config.llm.model.as_str()))
    };

    let cache: Arc<dyn SemanticQueryCache> = Arc::new(WeaviateQueryCache::new(
        HttpClient::new(),
        config.cache.endpoint.as_str(),
        config.cache.semantic.clone(),
    ));

    let schema = SchemaService::new(
        executor.clone(),
        generator.clone(),
        config.database.dialect.as_str(),
    )
    .load(config.database.schema_query.as_deref())
    .await;

    let resolver = QueryResolver::new(
        cache.clone(),
        generator,
        Arc::new(schema),
        config.database.dialect.as_str(),
    );
    let assembler = ResultAssembler::new(cache.clone());
    let query_service = QueryService::new(resolver, executor, assembler);

    Ok(AppState::new(Arc::new(query_service), cache))
}
