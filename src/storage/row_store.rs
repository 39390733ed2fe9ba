use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Conjunction of column equality tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    /// True when every condition holds for `row`; an empty filter matches everything
    pub fn matches(&self, row: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(column, expected)| row.get(column) == Some(expected))
    }
}

/// Table-oriented persistence backend
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Insert `record`, or merge it into the row that agrees on every `conflict_key` column.
    /// Columns absent from `record` keep their stored value.
    async fn upsert(&self, table: &str, record: Value, conflict_key: &[&str]) -> Result<()>;

    async fn delete(&self, table: &str, filter: &Filter) -> Result<()>;

    /// Merge `patch` into every row matching `filter`
    async fn update(&self, table: &str, patch: Value, filter: &Filter) -> Result<()>;

    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>>;
}
