//! Vector index drivers behind the semantic cache trait

mod in_memory;
mod weaviate;

pub use in_memory::InMemoryQueryCache;
pub use weaviate::WeaviateQueryCache;
