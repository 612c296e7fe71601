//! Semantic cache configuration

use serde::{Deserialize, Serialize};

/// Configuration for the semantic query cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticCacheConfig {
    /// Logical collection (class) holding question/query pairs
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Similarity certainty required for a lookup hit (0.0 to 1.0)
    ///
    /// Defaults conservative so semantically adjacent but wrong queries
    /// are not reused.
    #[serde(default = "default_certainty")]
    pub certainty: f32,
}

fn default_collection() -> String {
    "Default".to_string()
}

fn default_certainty() -> f32 {
    0.92
}

impl Default for SemanticCacheConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            certainty: default_certainty(),
        }
    }
}

impl SemanticCacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the collection name
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the certainty threshold, clamped to the valid range
    pub fn with_certainty(mut self, certainty: f32) -> Self {
        self.certainty = certainty.clamp(0.0, 1.0);
        self
    }
}
