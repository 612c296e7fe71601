//! Cached description of the target database's structure
//!
//! Produced once at startup and shared read-only via `Arc`; there is no
//! invalidation path for the lifetime of the process.

use crate::domain::value::Row;

/// Immutable snapshot of the target database schema, used to ground
/// generation prompts
#[derive(Debug, Clone, Default)]
pub struct SchemaSnapshot {
    rows: Vec<Row>,
}

impl SchemaSnapshot {
    /// Create a snapshot from introspection query results
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// An empty snapshot, used when schema loading failed or was skipped
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Render the snapshot as a JSON string for inclusion in prompts
    pub fn as_prompt_context(&self) -> String {
        serde_json::to_string(&self.rows).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::SqlValue;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = SchemaSnapshot::empty();

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.as_prompt_context(), "[]");
    }

    #[test]
    fn test_prompt_context_rendering() {
        let mut row = Row::new();
        row.insert("name".to_string(), SqlValue::from("users"));
        row.insert("sql".to_string(), SqlValue::from("CREATE TABLE users (id INTEGER)"));

        let snapshot = SchemaSnapshot::new(vec![row]);

        assert!(!snapshot.is_empty());
        assert_eq!(
            snapshot.as_prompt_context(),
            r#"[{"name":"users","sql":"CREATE TABLE users (id INTEGER)"}]"#
        );
    }
}
