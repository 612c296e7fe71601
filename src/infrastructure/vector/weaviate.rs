//! Weaviate-backed semantic query cache
//!
//! Talks to Weaviate over its REST and GraphQL surfaces: lazy class
//! creation with server-side text vectorization, nearText lookup under a
//! certainty threshold, object insertion and batch predicate deletion.

use async_trait::async_trait;

use crate::domain::semantic_cache::{CacheEntry, SemanticCacheConfig, SemanticQueryCache};
use crate::domain::DomainError;
use crate::infrastructure::http_client::{HttpClientTrait, JsonResponse};

const VECTORIZER: &str = "text2vec-openai";

/// Canary pair written right after class creation to validate the write
/// path end to end
const CANARY_QUESTION: &str = "Are you there?";
const CANARY_QUERY: &str = "SELECT 1;";

/// Semantic query cache backed by a Weaviate collection
#[derive(Debug)]
pub struct WeaviateQueryCache<C: HttpClientTrait> {
    client: C,
    base_url: String,
    config: SemanticCacheConfig,
}

impl<C: HttpClientTrait> WeaviateQueryCache<C> {
    pub fn new(client: C, base_url: impl Into<String>, config: SemanticCacheConfig) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            config,
        }
    }

    fn schema_url(&self) -> String {
        format!("{}/v1/schema", self.base_url)
    }

    fn class_url(&self) -> String {
        format!("{}/v1/schema/{}", self.base_url, self.config.collection)
    }

    fn objects_url(&self) -> String {
        format!("{}/v1/objects", self.base_url)
    }

    fn graphql_url(&self) -> String {
        format!("{}/v1/graphql", self.base_url)
    }

    fn batch_url(&self) -> String {
        format!("{}/v1/batch/objects", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![("Content-Type", "application/json")]
    }

    fn class_definition(&self) -> serde_json::Value {
        serde_json::json!({
            "class": self.config.collection,
            "vectorizer": VECTORIZER,
            "moduleConfig": { VECTORIZER: {} },
            "properties": [
                { "name": "question", "dataType": ["text"] },
                { "name": "query", "dataType": ["text"] },
            ],
        })
    }

    fn near_text_query(&self, question: &str) -> serde_json::Value {
        // serde_json string rendering doubles as GraphQL string escaping
        let concept = serde_json::Value::String(question.to_string()).to_string();

        serde_json::json!({
            "query": format!(
                "{{ Get {{ {}(limit: 1, nearText: {{concepts: [{}], certainty: {}}}) {{ question query }} }} }}",
                self.config.collection, concept, self.config.certainty
            ),
        })
    }

    async fn create_object(&self, entry: &CacheEntry) -> Result<(), DomainError> {
        let body = serde_json::json!({
            "class": self.config.collection,
            "properties": {
                "question": entry.question(),
                "query": entry.query(),
            },
        });

        let response = self
            .client
            .post_json(&self.objects_url(), self.headers(), &body)
            .await?;

        if !response.is_success() {
            return Err(DomainError::cache(format!(
                "failed to store cache entry: HTTP {}: {}",
                response.status, response.body
            )));
        }

        Ok(())
    }

    fn aggregate_batch_failures(results: &serde_json::Value) -> String {
        let mut message = String::new();

        if let Some(objects) = results["objects"].as_array() {
            for object in objects {
                let id = object["id"].as_str().unwrap_or("unknown");
                if let Some(errors) = object["errors"]["error"].as_array() {
                    for error in errors {
                        let detail = error["message"].as_str().unwrap_or("unknown error");
                        message.push_str(&format!("ObjectID: {}, Error: {}; ", id, detail));
                    }
                }
            }
        }

        message
    }
}

#[async_trait]
impl<C: HttpClientTrait> SemanticQueryCache for WeaviateQueryCache<C> {
    async fn ensure_collection(&self) -> Result<(), DomainError> {
        let existence = self
            .client
            .get_json(&self.class_url(), self.headers())
            .await?;

        if existence.is_success() {
            return Ok(());
        }

        if existence.status != 404 {
            return Err(DomainError::cache(format!(
                "failed to check collection existence: HTTP {}: {}",
                existence.status, existence.body
            )));
        }

        let created: JsonResponse = self
            .client
            .post_json(&self.schema_url(), self.headers(), &self.class_definition())
            .await?;

        if !created.is_success() {
            // A concurrent caller may have won the creation race
            if created.status == 422 && created.body.to_string().contains("already exists") {
                return Ok(());
            }

            return Err(DomainError::cache(format!(
                "failed to create collection: HTTP {}: {}",
                created.status, created.body
            )));
        }

        self.create_object(&CacheEntry::new(CANARY_QUESTION, CANARY_QUERY))
            .await
    }

    async fn lookup(&self, question: &str) -> Result<Option<String>, DomainError> {
        self.ensure_collection().await?;

        let response = self
            .client
            .post_json(&self.graphql_url(), self.headers(), &self.near_text_query(question))
            .await?;

        if !response.is_success() {
            return Err(DomainError::cache(format!(
                "lookup failed: HTTP {}: {}",
                response.status, response.body
            )));
        }

        if let Some(errors) = response.body["errors"].as_array() {
            if let Some(first) = errors.first() {
                let message = first["message"].as_str().unwrap_or("unknown GraphQL error");
                return Err(DomainError::cache(format!("lookup failed: {}", message)));
            }
        }

        let matches = response.body["data"]["Get"][&self.config.collection].as_array();
        let query = matches
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate["query"].as_str())
            .map(|q| q.to_string());

        Ok(query)
    }

    async fn insert(&self, entry: CacheEntry) -> Result<(), DomainError> {
        self.ensure_collection().await?;
        self.create_object(&entry).await
    }

    async fn delete_by_query(&self, query: &str) -> Result<usize, DomainError> {
        self.ensure_collection().await?;

        let body = serde_json::json!({
            "match": {
                "class": self.config.collection,
                "where": {
                    "operator": "ContainsAll",
                    "path": ["query"],
                    "valueTextArray": [query],
                },
            },
            "output": "verbose",
        });

        let response = self
            .client
            .delete_json(&self.batch_url(), self.headers(), &body)
            .await?;

        if !response.is_success() {
            return Err(DomainError::cache(format!(
                "batch delete failed: HTTP {}: {}",
                response.status, response.body
            )));
        }

        let results = &response.body["results"];
        let failed = results["failed"].as_u64().unwrap_or(0);

        if failed > 0 {
            return Err(DomainError::cache(Self::aggregate_batch_failures(results)));
        }

        Ok(results["successful"].as_u64().unwrap_or(0) as usize)
    }
}
