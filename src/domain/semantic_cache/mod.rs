//! Semantic cache domain models and traits
//!
//! Stores resolved (question, query) pairs in a vector index and matches
//! new questions by semantic similarity instead of exact key equality.

mod config;
mod repository;

pub use config::SemanticCacheConfig;
pub use repository::{CacheEntry, SemanticQueryCache};

#[cfg(test)]
pub use repository::mock;
