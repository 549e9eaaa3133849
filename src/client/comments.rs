use std::sync::Arc;

use serde_json::{json, Value};

use crate::database::models::Comment;

use super::{keys, ApiClient, ClientError, QueryCache};

/// Fields for createComment
#[derive(Debug, Clone)]
pub struct CreateCommentRequest {
    pub text_id: String,
    pub content: String,
    pub author: String,
}

/// Comment operations with listing cache and mutation-triggered invalidation.
///
/// Mutations clear the workspace's full listing and every per-text listing
/// in one pass, since either view may contain the affected comment.
pub struct CommentQueries {
    api: Arc<ApiClient>,
    cache: QueryCache,
}

impl CommentQueries {
    pub fn new(api: Arc<ApiClient>, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    /// Read-through listing, optionally filtered to one text
    pub async fn list(
        &self,
        workspace_id: &str,
        text_id: Option<&str>,
    ) -> Result<Vec<Comment>, ClientError> {
        let key = match text_id {
            Some(text_id) => keys::comments_by_text(workspace_id, text_id),
            None => keys::comments(workspace_id),
        };
        if let Some(cached) = self.cache.get(&key) {
            return parse_comments(cached);
        }

        let payload = match text_id {
            Some(text_id) => json!({ "text_id": text_id }),
            None => json!({}),
        };
        let body = self
            .api
            .call_secured("getComments", workspace_id, payload)
            .await?;
        let comments = body
            .get("comments")
            .cloned()
            .ok_or_else(|| ClientError::Malformed("missing 'comments' field".to_string()))?;
        self.cache.put(key, comments.clone());
        parse_comments(comments)
    }

    pub async fn create(
        &self,
        workspace_id: &str,
        data: CreateCommentRequest,
    ) -> Result<Comment, ClientError> {
        let body = self
            .api
            .call_secured(
                "createComment",
                workspace_id,
                json!({
                    "text_id": data.text_id,
                    "content": data.content,
                    "author": data.author,
                }),
            )
            .await?;
        self.cache.invalidate_prefix(&keys::comments(workspace_id));

        serde_json::from_value(body["comment"].clone())
            .map_err(|e| ClientError::Malformed(format!("bad 'comment' field: {}", e)))
    }

    pub async fn delete(
        &self,
        workspace_id: &str,
        comment_id: &str,
    ) -> Result<bool, ClientError> {
        let body = self
            .api
            .call_secured(
                "deleteComment",
                workspace_id,
                json!({ "commentId": comment_id }),
            )
            .await?;
        self.cache.invalidate_prefix(&keys::comments(workspace_id));
        Ok(body.get("deleted").and_then(Value::as_bool).unwrap_or(false))
    }
}

fn parse_comments(value: Value) -> Result<Vec<Comment>, ClientError> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::Malformed(format!("bad 'comments' field: {}", e)))
}
