//! Database execution adapters

mod sqlx_executor;

pub use sqlx_executor::SqlxQueryExecutor;
