//! Client-side service layer: a thin RPC wrapper over the callable API.
//!
//! [`ApiClient`] posts payloads to `/call/<name>` with the identity bearer
//! token, injects the cached workspace token for the target workspace, and
//! absorbs the refreshed `workspace_tokens` from every success envelope so
//! the local credential cache stays current without a separate round trip.

pub mod cache;
pub mod comments;
pub mod texts;

pub use cache::{keys, QueryCache};
pub use comments::{CommentQueries, CreateCommentRequest};
pub use texts::{CreateTextRequest, TextQueries, UpdateTextRequest};

use std::sync::{Arc, RwLock};

use serde_json::Value;
use thiserror::Error;

use crate::workspace::{WorkspaceTokenEntry, WorkspaceTokenMap};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("No workspace token held for workspace '{0}'")]
    MissingWorkspaceToken(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ClientError {
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Local cache of workspace credentials, shared by all service wrappers and
/// rewritten from each success response.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<WorkspaceTokenMap>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a credential obtained out of band (login, demo mint)
    pub fn insert(&self, workspace_id: &str, entry: WorkspaceTokenEntry) {
        self.inner
            .write()
            .expect("token store lock")
            .insert(workspace_id.to_string(), entry);
    }

    pub fn get(&self, workspace_id: &str) -> Option<WorkspaceTokenEntry> {
        self.inner
            .read()
            .expect("token store lock")
            .get(workspace_id)
            .cloned()
    }

    /// Merge refreshed tokens from a response envelope
    pub fn absorb(&self, tokens: WorkspaceTokenMap) {
        let mut store = self.inner.write().expect("token store lock");
        for (workspace_id, entry) in tokens {
            store.insert(workspace_id, entry);
        }
    }
}

/// RPC client invoking callable handlers by name.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    identity_token: String,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, identity_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            identity_token: identity_token.into(),
            tokens: TokenStore::new(),
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Invoke a callable for a workspace. The stored workspace token is
    /// injected into the payload; refreshed tokens from the response are
    /// absorbed before the envelope is returned.
    pub async fn call_secured(
        &self,
        name: &str,
        workspace_id: &str,
        mut payload: Value,
    ) -> Result<Value, ClientError> {
        let entry = self
            .tokens
            .get(workspace_id)
            .ok_or_else(|| ClientError::MissingWorkspaceToken(workspace_id.to_string()))?;

        payload
            .as_object_mut()
            .ok_or_else(|| ClientError::Malformed("payload must be an object".to_string()))?
            .insert("workspaceToken".to_string(), Value::String(entry.token));

        let body: Value = self
            .http
            .post(format!("{}/call/{}", self.base_url, name))
            .bearer_auth(&self.identity_token)
            .json(&payload)
            .send()
            .await?
            .json()
            .await?;

        if body.get("success").and_then(Value::as_bool) != Some(true) {
            let code = body["error"]["code"].as_str().unwrap_or("INTERNAL").to_string();
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or("Unknown error")
                .to_string();
            return Err(ClientError::Api { code, message });
        }

        if let Some(tokens) = body.get("workspace_tokens") {
            if let Ok(map) = serde_json::from_value::<WorkspaceTokenMap>(tokens.clone()) {
                self.tokens.absorb(map);
            }
        }

        Ok(body)
    }

    /// GET /health (no auth)
    pub async fn health(&self) -> Result<Value, ClientError> {
        let body = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .json()
            .await?;
        Ok(body)
    }
}
