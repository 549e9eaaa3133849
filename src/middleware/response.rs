use axum::Json;
use serde_json::{json, Map, Value};

use crate::workspace::WorkspaceTokenMap;

/// Builder for success envelopes that carry refreshed workspace tokens.
///
/// Created once per request after the workspace gate passes; every success
/// path wraps its payload through it so `workspace_tokens` is never
/// forgotten. Error responses go through [`crate::error::ApiError`] and do
/// not carry tokens.
#[derive(Debug)]
pub struct ResponseWithTokens {
    tokens: WorkspaceTokenMap,
}

pub fn response_with_tokens(tokens: WorkspaceTokenMap) -> ResponseWithTokens {
    ResponseWithTokens { tokens }
}

impl ResponseWithTokens {
    /// Wrap a payload object as `{ success: true, ...payload, workspace_tokens }`.
    ///
    /// Payload fields land at the top level of the envelope, matching the
    /// callable wire format (`{ success, text, workspace_tokens }` etc.).
    pub fn success(self, payload: Value) -> Json<Value> {
        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(true));

        if let Value::Object(fields) = payload {
            for (k, v) in fields {
                body.insert(k, v);
            }
        }

        body.insert(
            "workspace_tokens".to_string(),
            serde_json::to_value(&self.tokens).unwrap_or_else(|_| json!({})),
        );

        Json(Value::Object(body))
    }
}
