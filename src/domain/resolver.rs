//! Question-to-query resolution
//!
//! The resolver asks the semantic cache for a sufficiently similar prior
//! question first and only falls back to generation when nothing clears
//! the similarity threshold. A lookup failure is not a miss: it aborts
//! resolution instead of silently generating.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::generation::QueryGenerator;
use crate::domain::schema::SchemaSnapshot;
use crate::domain::semantic_cache::SemanticQueryCache;
use crate::domain::DomainError;

/// Provenance of a resolved query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuerySource {
    Cache,
    Generated,
    Manual,
}

impl fmt::Display for QuerySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Generated => write!(f, "generated"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Outcome of resolving one question; per-request, never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub query: String,
    pub source: QuerySource,
}

impl Resolution {
    pub fn new(query: impl Into<String>, source: QuerySource) -> Self {
        Self {
            query: query.into(),
            source,
        }
    }
}

/// Resolves questions into executable queries, cache first
#[derive(Debug)]
pub struct QueryResolver {
    cache: Arc<dyn SemanticQueryCache>,
    generator: Arc<dyn QueryGenerator>,
    schema: Arc<SchemaSnapshot>,
    dialect: String,
}

impl QueryResolver {
    pub fn new(
        cache: Arc<dyn SemanticQueryCache>,
        generator: Arc<dyn QueryGenerator>,
        schema: Arc<SchemaSnapshot>,
        dialect: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            generator,
            schema,
            dialect: dialect.into(),
        }
    }

    /// Resolve a question into a query and its provenance
    pub async fn resolve(&self, question: &str) -> Result<Resolution, DomainError> {
        match self.cache.lookup(question).await {
            Ok(Some(query)) => {
                debug!("Found the query in the semantic cache");
                Ok(Resolution::new(query, QuerySource::Cache))
            }
            Ok(None) => {
                debug!("No similar question cached, falling back to generation");
                let resolution = self.generate(question).await.map_err(|e| {
                    DomainError::resolution(format!("generation fallback failed: {}", e))
                })?;
                Ok(resolution)
            }
            Err(e) => Err(DomainError::resolution(format!(
                "cache lookup failed: {}",
                e
            ))),
        }
    }

    /// Generate a query for the question without consulting the cache
    pub async fn generate(&self, question: &str) -> Result<Resolution, DomainError> {
        let query = self
            .generator
            .generate(&self.translation_prompt(), &user_prompt(question))
            .await?;

        Ok(Resolution::new(query, QuerySource::Generated))
    }

    /// System prompt grounding generation on the dialect and schema
    fn translation_prompt(&self) -> String {
        format!(
            "You should translate all questions to valid {} queries. \
             You should provide ONLY SQL code, without formatting or explanations. \
             For assistance, here is the schema: {}",
            self.dialect,
            self.schema.as_prompt_context()
        )
    }
}

fn user_prompt(question: &str) -> String {
    format!("{} Provide only SQL code", question)
}
