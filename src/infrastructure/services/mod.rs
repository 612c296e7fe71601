//! Orchestration services composing domain components

mod query_service;
mod schema_service;

pub use query_service::QueryService;
pub use schema_service::SchemaService;
