//! Question-answering orchestration
//!
//! Composes the resolver, the executor and the result assembler into the
//! three request flows: cache-first ask, verbatim execute, and forced
//! generation.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, QueryExecutor, QueryResolver, QuerySource, ResponsePayload, ResultAssembler,
};

/// One-stop service behind the HTTP handlers
pub struct QueryService {
    resolver: QueryResolver,
    executor: Arc<dyn QueryExecutor>,
    assembler: ResultAssembler,
}

impl QueryService {
    pub fn new(
        resolver: QueryResolver,
        executor: Arc<dyn QueryExecutor>,
        assembler: ResultAssembler,
    ) -> Self {
        Self {
            resolver,
            executor,
            assembler,
        }
    }

    /// Resolve a question (cache first), execute the query and assemble
    /// the payload, driving cache population and eviction
    pub async fn ask(&self, question: &str) -> Result<ResponsePayload, DomainError> {
        let resolution = self.resolver.resolve(question).await?;
        info!("Resolved query ({}): {}", resolution.source, resolution.query);

        let result = self.executor.execute(&resolution.query).await;

        self.assembler.assemble(question, resolution, result).await
    }

    /// Execute a caller-supplied query verbatim; no cache interplay
    pub async fn execute_manual(&self, query: &str) -> Result<ResponsePayload, DomainError> {
        let rows = self.executor.execute(query).await?;

        Ok(ResponsePayload::new(rows, query, QuerySource::Manual))
    }

    /// Generate a query without consulting the cache, then execute it
    ///
    /// Unlike `ask`, a successful run does not populate the cache; `/add`
    /// exists for callers who want to persist the pair.
    pub async fn generate_and_run(&self, question: &str) -> Result<ResponsePayload, DomainError> {
        let resolution = self.resolver.generate(question).await?;
        info!("Generated query: {}", resolution.query);

        let rows = self.executor.execute(&resolution.query).await?;

        Ok(ResponsePayload::new(rows, resolution.query, QuerySource::Generated))
    }
}
