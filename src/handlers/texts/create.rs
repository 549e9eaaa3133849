use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::database::repositories::NewText;
use crate::error::ApiError;
use crate::middleware::{response_with_tokens, AuthUser};
use crate::validation::{optional_str, require_str, validate_required_fields};
use crate::workspace::{verify_workspace_token, WorkspaceRole};
use crate::AppState;

/// POST /call/createText - create a text in the caller's workspace
pub async fn create_text(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    validate_required_fields(&payload, &["workspaceToken", "content"])?;

    let workspace_token = require_str(&payload, "workspaceToken")?;
    let access = verify_workspace_token(workspace_token, &user.user_id, WorkspaceRole::Editor)?;
    let response = response_with_tokens(access.tokens);

    let content = require_str(&payload, "content")?;
    let title = optional_str(&payload, "title")?;

    // The owning workspace comes from the verified token, never the payload
    let text = state
        .db
        .texts()
        .create(
            &access.workspace_id,
            NewText {
                title: title.map(|t| t.trim().to_string()),
                content: content.trim().to_string(),
                created_by: user.user_id.clone(),
            },
        )
        .await?;

    tracing::info!(
        "Text {} created in workspace {} by {}",
        text.id,
        access.workspace_id,
        user.user_id
    );

    Ok(response.success(json!({ "text": text })))
}
