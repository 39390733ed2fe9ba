use crate::{
    prelude::HashMap,
    storage::row_store::{Filter, RowStore},
    MapError, Result,
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Mutex;

/// Row store kept in process memory. Useful offline and in tests.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    outage: Mutex<Option<String>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `message` until cleared with `None`
    pub fn set_outage(&self, message: Option<&str>) {
        if let Ok(mut outage) = self.outage.lock() {
            *outage = message.map(str::to_string);
        }
    }

    /// Number of rows currently in `table`
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .ok()
            .and_then(|tables| tables.get(table).map(Vec::len))
            .unwrap_or(0)
    }

    fn check_outage(&self) -> Result<()> {
        match self.outage.lock() {
            Ok(outage) => match outage.as_ref() {
                Some(message) => Err(MapError::Store(message.clone())),
                None => Ok(()),
            },
            Err(_) => Err(MapError::Store("row store lock poisoned".to_string())),
        }
    }

    fn with_table<T>(&self, table: &str, f: impl FnOnce(&mut Vec<Value>) -> Result<T>) -> Result<T> {
        self.check_outage()?;
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| MapError::Store("row store lock poisoned".to_string()))?;
        f(tables.entry(table.to_string()).or_default())
    }
}

fn as_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(MapError::Store(format!("expected a JSON object, got {}", other))),
    }
}

fn merge(row: &mut Value, patch: &Map<String, Value>) {
    if let Value::Object(fields) = row {
        for (column, value) in patch {
            fields.insert(column.clone(), value.clone());
        }
    }
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn upsert(&self, table: &str, record: Value, conflict_key: &[&str]) -> Result<()> {
        let record = as_object(record)?;
        let key = conflict_key.iter().fold(Filter::new(), |filter, column| {
            filter.eq(*column, record.get(*column).cloned().unwrap_or(Value::Null))
        });

        self.with_table(table, |rows| {
            match rows.iter().position(|row| key.matches(row)) {
                Some(index) => merge(&mut rows[index], &record),
                None => rows.push(Value::Object(record)),
            }
            Ok(())
        })
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<()> {
        self.with_table(table, |rows| {
            rows.retain(|row| !filter.matches(row));
            Ok(())
        })
    }

    async fn update(&self, table: &str, patch: Value, filter: &Filter) -> Result<()> {
        let patch = as_object(patch)?;
        self.with_table(table, |rows| {
            rows.iter_mut()
                .filter(|row| filter.matches(row))
                .for_each(|row| merge(row, &patch));
            Ok(())
        })
    }

    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>> {
        self.with_table(table, |rows| {
            Ok(rows.iter().filter(|row| filter.matches(row)).cloned().collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_upsert_merges_on_conflict_key() {
        let store = MemoryRowStore::new();
        let key = ["user_id", "place_id"];
        store
            .upsert("t", json!({"user_id": "u", "place_id": "p", "name": "A", "rating": 4}), &key)
            .await
            .unwrap();
        store
            .upsert("t", json!({"user_id": "u", "place_id": "p", "name": "B"}), &key)
            .await
            .unwrap();

        let rows = store.select("t", &Filter::new()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "B");
        assert_eq!(rows[0]["rating"], 4);
    }

    #[tokio::test]
    async fn test_update_and_delete_respect_filter() {
        let store = MemoryRowStore::new();
        for place in ["p1", "p2"] {
            store
                .upsert("t", json!({"user_id": "u", "place_id": place}), &["user_id", "place_id"])
                .await
                .unwrap();
        }

        let p1 = Filter::new().eq("user_id", "u").eq("place_id", "p1");
        store.update("t", json!({"rating": 5}), &p1).await.unwrap();
        let rows = store.select("t", &p1).await.unwrap();
        assert_eq!(rows[0]["rating"], 5);

        store.delete("t", &p1).await.unwrap();
        assert_eq!(store.row_count("t"), 1);
    }

    #[tokio::test]
    async fn test_outage_and_bad_records() {
        let store = MemoryRowStore::new();
        assert!(matches!(
            store.upsert("t", json!([1, 2]), &["id"]).await,
            Err(MapError::Store(_))
        ));

        store.set_outage(Some("service unavailable"));
        match store.select("t", &Filter::new()).await {
            Err(MapError::Store(message)) => assert_eq!(message, "service unavailable"),
            other => panic!("expected outage, got {:?}", other),
        }
        store.set_outage(None);
        assert!(store.select("t", &Filter::new()).await.unwrap().is_empty());
    }
}
