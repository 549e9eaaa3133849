use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::database::models::Text;

use super::{keys, ApiClient, ClientError, QueryCache};

/// Fields for createText
#[derive(Debug, Clone)]
pub struct CreateTextRequest {
    pub title: Option<String>,
    pub content: String,
}

/// Fields for updateText; absent fields are left untouched server-side
#[derive(Debug, Clone, Default)]
pub struct UpdateTextRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Text operations with listing cache and mutation-triggered invalidation.
pub struct TextQueries {
    api: Arc<ApiClient>,
    cache: QueryCache,
}

impl TextQueries {
    pub fn new(api: Arc<ApiClient>, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    /// Read-through listing, newest first
    pub async fn list(&self, workspace_id: &str) -> Result<Vec<Text>, ClientError> {
        let key = keys::texts(workspace_id);
        if let Some(cached) = self.cache.get(&key) {
            return parse_texts(cached);
        }

        let body = self.api.call_secured("getTexts", workspace_id, json!({})).await?;
        let texts = body
            .get("texts")
            .cloned()
            .ok_or_else(|| ClientError::Malformed("missing 'texts' field".to_string()))?;
        self.cache.put(key, texts.clone());
        parse_texts(texts)
    }

    pub async fn create(
        &self,
        workspace_id: &str,
        data: CreateTextRequest,
    ) -> Result<Text, ClientError> {
        let mut payload = Map::new();
        payload.insert("content".to_string(), Value::String(data.content));
        if let Some(title) = data.title {
            payload.insert("title".to_string(), Value::String(title));
        }

        let body = self
            .api
            .call_secured("createText", workspace_id, Value::Object(payload))
            .await?;
        self.cache.invalidate(&keys::texts(workspace_id));
        parse_text(body)
    }

    pub async fn update(
        &self,
        workspace_id: &str,
        text_id: &str,
        data: UpdateTextRequest,
    ) -> Result<Text, ClientError> {
        let mut payload = Map::new();
        payload.insert("textId".to_string(), Value::String(text_id.to_string()));
        if let Some(content) = data.content {
            payload.insert("content".to_string(), Value::String(content));
        }
        if let Some(title) = data.title {
            payload.insert("title".to_string(), Value::String(title));
        }

        let body = self
            .api
            .call_secured("updateText", workspace_id, Value::Object(payload))
            .await?;
        self.cache.invalidate(&keys::texts(workspace_id));
        parse_text(body)
    }

    pub async fn delete(&self, workspace_id: &str, text_id: &str) -> Result<bool, ClientError> {
        let body = self
            .api
            .call_secured("deleteText", workspace_id, json!({ "textId": text_id }))
            .await?;
        self.cache.invalidate(&keys::texts(workspace_id));
        Ok(body.get("deleted").and_then(Value::as_bool).unwrap_or(false))
    }
}

fn parse_text(body: Value) -> Result<Text, ClientError> {
    serde_json::from_value(body["text"].clone())
        .map_err(|e| ClientError::Malformed(format!("bad 'text' field: {}", e)))
}

fn parse_texts(value: Value) -> Result<Vec<Text>, ClientError> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::Malformed(format!("bad 'texts' field: {}", e)))
}
