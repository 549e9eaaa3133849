use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{response_with_tokens, AuthUser};
use crate::validation::{require_str, validate_required_fields};
use crate::workspace::{verify_workspace_token, WorkspaceRole};
use crate::AppState;

/// POST /call/deleteComment - physically remove a comment
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    validate_required_fields(&payload, &["workspaceToken", "commentId"])?;

    let workspace_token = require_str(&payload, "workspaceToken")?;
    let access = verify_workspace_token(workspace_token, &user.user_id, WorkspaceRole::Editor)?;
    let response = response_with_tokens(access.tokens);

    let comment_id = require_str(&payload, "commentId")?;

    let deleted = state
        .db
        .comments()
        .delete(comment_id, &access.workspace_id)
        .await?;
    if !deleted {
        return Err(ApiError::not_found("Comment not found"));
    }

    tracing::info!(
        "Comment {} deleted from workspace {} by {}",
        comment_id,
        access.workspace_id,
        user.user_id
    );

    Ok(response.success(json!({ "deleted": true })))
}
