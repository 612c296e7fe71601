//! Query execution over sqlx's `Any` driver
//!
//! The configured database URL picks the backend (postgres, mysql or
//! sqlite). Rows come back as loosely-typed column maps; each value is
//! decoded by the reported column type name, with text as the fallback.

use async_trait::async_trait;
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Column, Row as _, TypeInfo};

use crate::domain::value::{Row, SqlValue};
use crate::domain::{DomainError, QueryExecutor};

/// `QueryExecutor` backed by a sqlx connection pool
///
/// Each execution checks a connection out of the pool and returns it when
/// done; no transaction spans more than one call.
#[derive(Debug)]
pub struct SqlxQueryExecutor {
    pool: AnyPool,
}

impl SqlxQueryExecutor {
    /// Connect to the database behind `url`
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DomainError> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| {
                DomainError::configuration(format!("Failed to connect to the database: {}", e))
            })?;

        Ok(Self { pool })
    }

    fn decode_row(row: &AnyRow) -> Result<Row, DomainError> {
        let mut decoded = Row::new();

        for (index, column) in row.columns().iter().enumerate() {
            let value = Self::decode_column(row, index, column.type_info().name())?;
            decoded.insert(column.name().to_string(), value);
        }

        Ok(decoded)
    }

    fn decode_column(row: &AnyRow, index: usize, type_name: &str) -> Result<SqlValue, DomainError> {
        let type_name = type_name.to_uppercase();

        let value = if type_name.contains("BOOL") {
            row.try_get::<Option<bool>, _>(index)
                .map(|v| v.map_or(SqlValue::Null, SqlValue::Boolean))
        } else if type_name.contains("INT") {
            row.try_get::<Option<i64>, _>(index)
                .map(|v| v.map_or(SqlValue::Null, SqlValue::Integer))
        } else if ["REAL", "FLOAT", "DOUBLE", "NUMERIC", "DECIMAL"]
            .iter()
            .any(|t| type_name.contains(t))
        {
            row.try_get::<Option<f64>, _>(index)
                .map(|v| v.map_or(SqlValue::Null, SqlValue::Float))
        } else if ["BLOB", "BYTEA", "BINARY"].iter().any(|t| type_name.contains(t)) {
            row.try_get::<Option<Vec<u8>>, _>(index)
                .map(|v| v.map_or(SqlValue::Null, SqlValue::Bytes))
        } else {
            // TEXT, VARCHAR, NULL and anything unrecognized
            row.try_get::<Option<String>, _>(index)
                .map(|v| v.map_or(SqlValue::Null, SqlValue::Text))
        };

        value.map_err(|e| DomainError::execution(format!("Failed to decode column: {}", e)))
    }
}

#[async_trait]
impl QueryExecutor for SqlxQueryExecutor {
    async fn execute(&self, query: &str) -> Result<Vec<Row>, DomainError> {
        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::execution(e.to_string()))?;

        rows.iter().map(Self::decode_row).collect()
    }
}
