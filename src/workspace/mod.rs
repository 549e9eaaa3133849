//! Workspace authorization gate.
//!
//! Workspace tokens are short-lived JWTs binding a caller to a role inside
//! one workspace. Every callable verifies the presented token against a
//! minimum role, and every success response carries a refreshed token map so
//! the client's credential cache stays current without an extra round trip.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::config;
use crate::error::ApiError;

/// Caller roles within a workspace, weakest first. Authorization compares
/// positions in this order, never the string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceRole {
    Viewer,
    Editor,
    Admin,
}

impl WorkspaceRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceRole::Viewer => "viewer",
            WorkspaceRole::Editor => "editor",
            WorkspaceRole::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "viewer" => Some(WorkspaceRole::Viewer),
            "editor" => Some(WorkspaceRole::Editor),
            "admin" => Some(WorkspaceRole::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkspaceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims carried by a workspace token.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkspaceClaims {
    /// Caller uid the token was issued to
    pub sub: String,
    pub workspace_id: String,
    pub role: WorkspaceRole,
    pub exp: i64,
    pub iat: i64,
}

/// One refreshed credential as echoed back to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceTokenEntry {
    pub role: String,
    pub token: String,
}

/// workspace_id -> refreshed credential
pub type WorkspaceTokenMap = HashMap<String, WorkspaceTokenEntry>;

/// Outcome of a successful gate check.
#[derive(Debug)]
pub struct WorkspaceAccess {
    pub workspace_id: String,
    pub role: WorkspaceRole,
    /// Refreshed tokens to attach to the success envelope
    pub tokens: WorkspaceTokenMap,
}

/// Mint a workspace token for a caller.
pub fn issue_workspace_token(
    workspace_id: &str,
    uid: &str,
    role: WorkspaceRole,
) -> Result<String, auth::JwtError> {
    let now = Utc::now();
    let expiry_mins = config::config().security.workspace_token_expiry_mins;
    let claims = WorkspaceClaims {
        sub: uid.to_string(),
        workspace_id: workspace_id.to_string(),
        role,
        exp: (now + Duration::minutes(expiry_mins as i64)).timestamp(),
        iat: now.timestamp(),
    };
    auth::sign(&claims)
}

/// Verify a workspace token for a caller against a minimum required role.
///
/// Returns the resolved workspace and a refreshed token map on success.
/// A token that cannot be decoded, has expired, or was issued to a different
/// caller never resolves to a workspace; a decoded role below `min_role` is
/// a role failure.
pub fn verify_workspace_token(
    token: &str,
    uid: &str,
    min_role: WorkspaceRole,
) -> Result<WorkspaceAccess, ApiError> {
    let claims: WorkspaceClaims = auth::verify(token)
        .map_err(|_| ApiError::invalid_workspace("Workspace token is invalid or expired"))?;

    if claims.sub != uid {
        return Err(ApiError::invalid_workspace(
            "Workspace token was not issued to this caller",
        ));
    }

    if claims.role < min_role {
        return Err(ApiError::forbidden(format!(
            "Role '{}' required for this operation",
            min_role
        )));
    }

    let refreshed = issue_workspace_token(&claims.workspace_id, uid, claims.role)
        .map_err(|e| {
            tracing::error!("Failed to refresh workspace token: {}", e);
            ApiError::internal("Failed to refresh workspace credentials")
        })?;

    let mut tokens = WorkspaceTokenMap::new();
    tokens.insert(
        claims.workspace_id.clone(),
        WorkspaceTokenEntry {
            role: claims.role.as_str().to_string(),
            token: refreshed,
        },
    );

    Ok(WorkspaceAccess {
        workspace_id: claims.workspace_id,
        role: claims.role,
        tokens,
    })
}
