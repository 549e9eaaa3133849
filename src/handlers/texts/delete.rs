use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{response_with_tokens, AuthUser};
use crate::validation::{require_str, validate_required_fields};
use crate::workspace::{verify_workspace_token, WorkspaceRole};
use crate::AppState;

/// POST /call/deleteText - physically remove a text
///
/// Deleting an absent id reports NOT_FOUND rather than silently succeeding.
/// Comments on the text are left in place (orphan tolerant).
pub async fn delete_text(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    validate_required_fields(&payload, &["workspaceToken", "textId"])?;

    let workspace_token = require_str(&payload, "workspaceToken")?;
    let access = verify_workspace_token(workspace_token, &user.user_id, WorkspaceRole::Editor)?;
    let response = response_with_tokens(access.tokens);

    let text_id = require_str(&payload, "textId")?;

    let deleted = state.db.texts().delete(text_id, &access.workspace_id).await?;
    if !deleted {
        return Err(ApiError::not_found("Text not found"));
    }

    tracing::info!(
        "Text {} deleted from workspace {} by {}",
        text_id,
        access.workspace_id,
        user.user_id
    );

    Ok(response.success(json!({ "deleted": true })))
}
