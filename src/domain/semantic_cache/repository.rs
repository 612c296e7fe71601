//! Semantic query cache trait and types

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A (question, query) pair stored in the vector index
///
/// The narrow two-field shape is deliberate: the index's generic property
/// maps never leak past this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    question: String,
    query: String,
}

impl CacheEntry {
    pub fn new(question: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            query: query.into(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Trait for the semantic query cache backed by a vector index
///
/// A failure reaching the index surfaces as `DomainError::Cache`; it is
/// never folded into a lookup miss.
#[async_trait]
pub trait SemanticQueryCache: Send + Sync + Debug {
    /// Idempotent lazy initialization of the backing collection
    ///
    /// Creates the collection configured for automatic text vectorization
    /// if it does not exist yet, then seeds it with one canary entry to
    /// validate write capability. Safe under concurrent first access;
    /// "already exists" is success.
    async fn ensure_collection(&self) -> Result<(), DomainError>;

    /// Top-1 nearest-neighbor lookup over stored questions
    ///
    /// Returns the stored query of the best match clearing the certainty
    /// threshold, or `None` when nothing does.
    async fn lookup(&self, question: &str) -> Result<Option<String>, DomainError>;

    /// Store a new entry; duplicates are permitted and accumulate
    async fn insert(&self, entry: CacheEntry) -> Result<(), DomainError>;

    /// Remove every entry whose query field contains the given text
    ///
    /// Returns the number of entries removed; zero matches is success.
    async fn delete_by_query(&self, query: &str) -> Result<usize, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock cache with a scripted lookup result and recorded mutations
    #[derive(Debug)]
    pub struct MockSemanticCache {
        lookup_result: Option<String>,
        lookup_error: Option<String>,
        insert_error: Option<String>,
        inserted: Mutex<Vec<CacheEntry>>,
        deleted: Mutex<Vec<String>>,
        delete_error: Option<String>,
    }

    impl MockSemanticCache {
        pub fn new() -> Self {
            Self {
                lookup_result: None,
                lookup_error: None,
                insert_error: None,
                inserted: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
                delete_error: None,
            }
        }

        pub fn with_lookup_hit(mut self, query: impl Into<String>) -> Self {
            self.lookup_result = Some(query.into());
            self
        }

        pub fn with_lookup_error(mut self, error: impl Into<String>) -> Self {
            self.lookup_error = Some(error.into());
            self
        }

        pub fn with_insert_error(mut self, error: impl Into<String>) -> Self {
            self.insert_error = Some(error.into());
            self
        }

        pub fn with_delete_error(mut self, error: impl Into<String>) -> Self {
            self.delete_error = Some(error.into());
            self
        }

        pub fn inserted(&self) -> Vec<CacheEntry> {
            self.inserted.lock().unwrap().clone()
        }

        pub fn deleted(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }
    }

    impl Default for MockSemanticCache {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SemanticQueryCache for MockSemanticCache {
        async fn ensure_collection(&self) -> Result<(), DomainError> {
            Ok(())
        }

        async fn lookup(&self, _question: &str) -> Result<Option<String>, DomainError> {
            if let Some(ref error) = self.lookup_error {
                return Err(DomainError::cache(error));
            }
            Ok(self.lookup_result.clone())
        }

        async fn insert(&self, entry: CacheEntry) -> Result<(), DomainError> {
            if let Some(ref error) = self.insert_error {
                return Err(DomainError::cache(error));
            }
            self.inserted.lock().unwrap().push(entry);
            Ok(())
        }

        async fn delete_by_query(&self, query: &str) -> Result<usize, DomainError> {
            if let Some(ref error) = self.delete_error {
                return Err(DomainError::cache(error));
            }
            self.deleted.lock().unwrap().push(query.to_string());
            Ok(1)
        }
    }
}
