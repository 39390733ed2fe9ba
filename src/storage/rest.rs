use crate::{
    places::google::HTTP_CLIENT,
    storage::row_store::{Filter, RowStore},
    MapError, Result,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use std::sync::RwLock;

/// Row store speaking the PostgREST dialect (as exposed by Supabase under `/rest/v1`)
#[derive(Debug)]
pub struct RestRowStore {
    base_url: String,
    api_key: String,
    access_token: RwLock<Option<String>>,
}

impl RestRowStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: RwLock::new(None),
        }
    }

    /// Send requests as the signed-in user so row-level security applies; `None` reverts to the anon key
    pub fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut current) = self.access_token.write() {
            *current = token;
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .access_token
            .read()
            .ok()
            .and_then(|token| token.clone())
            .unwrap_or_else(|| self.api_key.clone());
        request
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }
}

/// `column=eq.value` query pairs
pub fn filter_params(filter: &Filter) -> Vec<(String, String)> {
    filter
        .conditions()
        .iter()
        .map(|(column, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (column.clone(), format!("eq.{}", value))
        })
        .collect()
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status));
    Err(MapError::Store(message))
}

#[async_trait]
impl RowStore for RestRowStore {
    async fn upsert(&self, table: &str, record: Value, conflict_key: &[&str]) -> Result<()> {
        let request = HTTP_CLIENT
            .post(self.table_url(table))
            .query(&[("on_conflict", conflict_key.join(","))])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&record);
        check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<()> {
        let request = HTTP_CLIENT
            .delete(self.table_url(table))
            .query(&filter_params(filter));
        check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn update(&self, table: &str, patch: Value, filter: &Filter) -> Result<()> {
        let request = HTTP_CLIENT
            .patch(self.table_url(table))
            .query(&filter_params(filter))
            .header("Prefer", "return=minimal")
            .json(&patch);
        check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>> {
        let request = HTTP_CLIENT
            .get(self.table_url(table))
            .query(&[("select", "*")])
            .query(&filter_params(filter));
        let response = check(self.authorize(request).send().await?).await?;
        Ok(response.json::<Vec<Value>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_params_use_eq_operator() {
        let filter = Filter::new().eq("user_id", "u-1").eq("rating", 4);
        assert_eq!(
            filter_params(&filter),
            vec![
                ("user_id".to_string(), "eq.u-1".to_string()),
                ("rating".to_string(), "eq.4".to_string()),
            ]
        );
    }

    #[test]
    fn test_base_url_is_normalised() {
        let store = RestRowStore::new("https://db.example/rest/v1/", "anon");
        assert_eq!(store.table_url("saved_apartments"), "https://db.example/rest/v1/saved_apartments");
    }
}
