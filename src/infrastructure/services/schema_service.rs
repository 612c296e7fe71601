//! Schema snapshot loading
//!
//! Runs once at startup. A missing or failing introspection query is
//! logged, never fatal: the service starts with an empty snapshot and
//! trades grounding quality for availability.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainError, QueryExecutor, QueryGenerator, SchemaSnapshot};

/// Loads the schema snapshot, generating the introspection query when
/// none is configured
pub struct SchemaService {
    executor: Arc<dyn QueryExecutor>,
    generator: Arc<dyn QueryGenerator>,
    dialect: String,
}

impl SchemaService {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        generator: Arc<dyn QueryGenerator>,
        dialect: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            generator,
            dialect: dialect.into(),
        }
    }

    /// Load the snapshot, degrading to empty on any failure
    pub async fn load(&self, configured_query: Option<&str>) -> SchemaSnapshot {
        let query = match configured_query {
            Some(query) => query.to_string(),
            None => match self.generate_introspection_query().await {
                Ok(query) => query,
                Err(e) => {
                    warn!("Couldn't generate the schema query: {}", e);
                    return SchemaSnapshot::empty();
                }
            },
        };

        match self.executor.execute(&query).await {
            Ok(rows) => {
                info!("Loaded schema snapshot with {} rows", rows.len());
                SchemaSnapshot::new(rows)
            }
            Err(e) => {
                warn!("Couldn't retrieve the schema: {}", e);
                SchemaSnapshot::empty()
            }
        }
    }

    async fn generate_introspection_query(&self) -> Result<String, DomainError> {
        self.generator
            .generate(
                "You should provide ONLY SQL code, without explanations or markdown. ",
                &format!(
                    "I need an SQL query to get the schema of the {} database. \
                     If there is no such query, please provide the closest one which \
                     can fetch the information in a most accurate way.",
                    self.dialect
                ),
            )
            .await
    }
}
