//! Query execution capability

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::value::Row;
use crate::domain::DomainError;

/// Trait for running queries against the target database
///
/// Each call acquires and releases its own connection; no transaction
/// spans more than one call.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute a query and return all result rows
    ///
    /// An empty result set is a successful execution with zero rows, not
    /// an error.
    async fn execute(&self, query: &str) -> Result<Vec<Row>, DomainError>;
}
