//! Result assembly and the cache write/evict lifecycle
//!
//! On a successful execution of a generated query the (question, query)
//! pair is persisted; on a failed execution of a cache-hit query the
//! offending entry is purged so it is never served again. Both side
//! effects are best effort: their own failures are logged, never allowed
//! to shadow the primary outcome.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::domain::resolver::{QuerySource, Resolution};
use crate::domain::semantic_cache::{CacheEntry, SemanticQueryCache};
use crate::domain::value::Row;
use crate::domain::DomainError;

/// Response payload for a resolved and executed question
#[derive(Debug, Clone, Serialize)]
pub struct ResponsePayload {
    pub rows: Vec<Row>,
    pub query: String,
    pub source: QuerySource,
}

impl ResponsePayload {
    pub fn new(rows: Vec<Row>, query: impl Into<String>, source: QuerySource) -> Self {
        Self {
            rows,
            query: query.into(),
            source,
        }
    }
}

/// Packages execution outcomes into payloads and drives cache population
/// and self-healing eviction
#[derive(Debug)]
pub struct ResultAssembler {
    cache: Arc<dyn SemanticQueryCache>,
}

impl ResultAssembler {
    pub fn new(cache: Arc<dyn SemanticQueryCache>) -> Self {
        Self { cache }
    }

    /// Assemble a payload from an execution outcome
    ///
    /// An empty row set is a valid payload; only an execution error
    /// propagates, after any eviction it triggers.
    pub async fn assemble(
        &self,
        question: &str,
        resolution: Resolution,
        result: Result<Vec<Row>, DomainError>,
    ) -> Result<ResponsePayload, DomainError> {
        match result {
            Ok(rows) => {
                if resolution.source == QuerySource::Generated {
                    let entry = CacheEntry::new(question, resolution.query.as_str());
                    if let Err(e) = self.cache.insert(entry).await {
                        warn!("Failed to cache the generated query: {}", e);
                    }
                }

                Ok(ResponsePayload::new(rows, resolution.query, resolution.source))
            }
            Err(error) => {
                if resolution.source == QuerySource::Cache {
                    match self.cache.delete_by_query(&resolution.query).await {
                        Ok(removed) => {
                            warn!(
                                "Evicted {} cache entries for a query that failed execution",
                                removed
                            );
                        }
                        Err(e) => {
                            warn!("Failed to evict the bad cache entry: {}", e);
                        }
                    }
                }

                Err(error)
            }
        }
    }
}
