//! Domain layer - resolution core, capability traits and entities

pub mod assembler;
pub mod error;
pub mod execution;
pub mod generation;
pub mod resolver;
pub mod schema;
pub mod semantic_cache;
pub mod value;

pub use assembler::{ResponsePayload, ResultAssembler};
pub use error::DomainError;
pub use execution::QueryExecutor;
#[cfg(test)]
pub use execution::MockQueryExecutor;
pub use generation::QueryGenerator;
pub use resolver::{QueryResolver, QuerySource, Resolution};
pub use schema::SchemaSnapshot;
pub use semantic_cache::{CacheEntry, SemanticCacheConfig, SemanticQueryCache};
pub use value::{Row, SqlValue};
