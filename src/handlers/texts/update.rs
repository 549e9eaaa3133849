use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::database::repositories::TextChanges;
use crate::error::ApiError;
use crate::middleware::{response_with_tokens, AuthUser};
use crate::validation::{optional_str, require_str, validate_required_fields};
use crate::workspace::{verify_workspace_token, WorkspaceRole};
use crate::AppState;

/// POST /call/updateText - update any subset of content/title
///
/// A payload with neither field behaves as a no-op read and returns the
/// current state.
pub async fn update_text(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    validate_required_fields(&payload, &["workspaceToken", "textId"])?;

    let workspace_token = require_str(&payload, "workspaceToken")?;
    let access = verify_workspace_token(workspace_token, &user.user_id, WorkspaceRole::Editor)?;
    let response = response_with_tokens(access.tokens);

    let text_id = require_str(&payload, "textId")?;
    let content = optional_str(&payload, "content")?;
    let title = optional_str(&payload, "title")?;

    // Content stays required on the entity, so a provided-but-blank value is rejected
    if let Some(c) = content {
        if c.trim().is_empty() {
            return Err(ApiError::invalid_input("Content cannot be empty"));
        }
    }

    let changes = TextChanges {
        title: title.map(|t| t.trim().to_string()),
        content: content.map(|c| c.trim().to_string()),
    };

    let text = state
        .db
        .texts()
        .update(text_id, &access.workspace_id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Text not found"))?;

    tracing::info!(
        "Text {} updated in workspace {} by {}",
        text.id,
        access.workspace_id,
        user.user_id
    );

    Ok(response.success(json!({ "text": text })))
}
