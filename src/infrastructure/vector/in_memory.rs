//! In-memory semantic query cache
//!
//! Suitable for development and tests. Similarity is token-overlap
//! (Jaccard) over lowercased words instead of a learned embedding, which
//! keeps lookups deterministic without an external vectorizer.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::semantic_cache::{CacheEntry, SemanticCacheConfig, SemanticQueryCache};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
struct StoredEntry {
    id: Uuid,
    entry: CacheEntry,
}

/// Linear-scan in-memory cache
#[derive(Debug)]
pub struct InMemoryQueryCache {
    entries: RwLock<Vec<StoredEntry>>,
    certainty: f32,
}

impl InMemoryQueryCache {
    pub fn new(config: &SemanticCacheConfig) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            certainty: config.certainty,
        }
    }

    fn tokens(text: &str) -> HashSet<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect()
    }

    /// Jaccard similarity over word sets; 1.0 for identical token sets
    fn similarity(a: &str, b: &str) -> f32 {
        let left = Self::tokens(a);
        let right = Self::tokens(b);

        if left.is_empty() && right.is_empty() {
            return 1.0;
        }

        let intersection = left.intersection(&right).count() as f32;
        let union = left.union(&right).count() as f32;

        if union == 0.0 {
            return 0.0;
        }

        intersection / union
    }
}

#[async_trait]
impl SemanticQueryCache for InMemoryQueryCache {
    async fn ensure_collection(&self) -> Result<(), DomainError> {
        // The Vec is the collection; nothing to provision
        Ok(())
    }

    async fn lookup(&self, question: &str) -> Result<Option<String>, DomainError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DomainError::cache(format!("Failed to acquire read lock: {}", e)))?;

        // Ties resolve to the earliest-inserted entry (stable scan)
        let mut best: Option<(f32, &StoredEntry)> = None;

        for stored in entries.iter() {
            let score = Self::similarity(question, stored.entry.question());

            if score < self.certainty {
                continue;
            }

            match best {
                Some((best_score, _)) if best_score >= score => {}
                _ => best = Some((score, stored)),
            }
        }

        Ok(best.map(|(_, stored)| stored.entry.query().to_string()))
    }

    async fn insert(&self, entry: CacheEntry) -> Result<(), DomainError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| DomainError::cache(format!("Failed to acquire write lock: {}", e)))?;

        entries.push(StoredEntry {
            id: Uuid::new_v4(),
            entry,
        });

        Ok(())
    }

    async fn delete_by_query(&self, query: &str) -> Result<usize, DomainError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| DomainError::cache(format!("Failed to acquire write lock: {}", e)))?;

        let removed: Vec<Uuid> = entries
            .iter()
            .filter(|stored| stored.entry.query().contains(query))
            .map(|stored| stored.id)
            .collect();

        entries.retain(|stored| !removed.contains(&stored.id));

        if !removed.is_empty() {
            debug!("Deleted cache entries: {:?}", removed);
        }

        Ok(removed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(certainty: f32) -> InMemoryQueryCache {
        InMemoryQueryCache::new(&SemanticCacheConfig::new().with_certainty(certainty))
    }

    #[tokio::test]
    async fn test_insert_then_lookup_round_trip() {
        let cache = cache(0.92);

        cache
            .insert(CacheEntry::new(
                "How many users are there?",
                "SELECT COUNT(*) FROM users;",
            ))
            .await
            .unwrap();

        let hit = cache.lookup("How many users are there?").await.unwrap();

        assert_eq!(hit.as_deref(), Some("SELECT COUNT(*) FROM users;"));
    }

    #[tokio::test]
    async fn test_near_duplicate_above_threshold_hits() {
        let cache = cache(0.7);

        cache
            .insert(CacheEntry::new(
                "how many users are there",
                "SELECT COUNT(*) FROM users;",
            ))
            .await
            .unwrap();

        // Same words, different casing and punctuation
        let hit = cache.lookup("How many users are THERE?").await.unwrap();

        assert_eq!(hit.as_deref(), Some("SELECT COUNT(*) FROM users;"));
    }

    #[tokio::test]
    async fn test_dissimilar_question_misses() {
        let cache = cache(0.92);

        cache
            .insert(CacheEntry::new(
                "How many users are there?",
                "SELECT COUNT(*) FROM users;",
            ))
            .await
            .unwrap();

        let miss = cache
            .lookup("What is the average order total?")
            .await
            .unwrap();

        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_best_match_wins() {
        let cache = cache(0.3);

        cache
            .insert(CacheEntry::new("count users", "SELECT 1;"))
            .await
            .unwrap();
        cache
            .insert(CacheEntry::new("count all active users", "SELECT 2;"))
            .await
            .unwrap();

        let hit = cache.lookup("count active users").await.unwrap();

        assert_eq!(hit.as_deref(), Some("SELECT 2;"));
    }

    #[tokio::test]
    async fn test_duplicates_accumulate() {
        let cache = cache(0.92);
        let entry = CacheEntry::new("ping", "SELECT 1;");

        cache.insert(entry.clone()).await.unwrap();
        cache.insert(entry).await.unwrap();

        let removed = cache.delete_by_query("SELECT 1;").await.unwrap();

        assert_eq!(removed, 2);
    }

    #[tokio::test]
    async fn test_delete_contains_match() {
        let cache = cache(0.92);

        cache
            .insert(CacheEntry::new("a", "SELECT * FROM users WHERE id = 1;"))
            .await
            .unwrap();
        cache
            .insert(CacheEntry::new("b", "SELECT * FROM orders;"))
            .await
            .unwrap();

        let removed = cache.delete_by_query("FROM users").await.unwrap();

        assert_eq!(removed, 1);
        assert!(cache.lookup("b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_zero_matches_is_success() {
        let cache = cache(0.92);

        let removed = cache.delete_by_query("SELECT nothing;").await.unwrap();

        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_lookup_after_eviction_misses() {
        let cache = cache(0.92);

        cache
            .insert(CacheEntry::new("list users", "SELECT * FROM users;"))
            .await
            .unwrap();
        cache.delete_by_query("SELECT * FROM users;").await.unwrap();

        assert!(cache.lookup("list users").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ensure_collection_is_idempotent() {
        let cache = cache(0.92);

        cache.ensure_collection().await.unwrap();
        cache.ensure_collection().await.unwrap();

        cache
            .insert(CacheEntry::new("ping", "SELECT 1;"))
            .await
            .unwrap();

        assert!(cache.lookup("ping").await.unwrap().is_some());
    }
}
