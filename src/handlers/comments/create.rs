use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::database::repositories::NewComment;
use crate::error::ApiError;
use crate::middleware::{response_with_tokens, AuthUser};
use crate::validation::{require_str, validate_required_fields};
use crate::workspace::{verify_workspace_token, WorkspaceRole};
use crate::AppState;

use super::validate_comment_bounds;

/// POST /call/createComment - attach a comment to a text
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    validate_required_fields(&payload, &["workspaceToken", "text_id", "content", "author"])?;

    let workspace_token = require_str(&payload, "workspaceToken")?;
    let access = verify_workspace_token(workspace_token, &user.user_id, WorkspaceRole::Editor)?;
    let response = response_with_tokens(access.tokens);

    let text_id = require_str(&payload, "text_id")?;
    let content = require_str(&payload, "content")?;
    let author = require_str(&payload, "author")?;

    validate_comment_bounds(content, author)?;

    let comment = state
        .db
        .comments()
        .create(
            &access.workspace_id,
            NewComment {
                text_id: text_id.trim().to_string(),
                content: content.trim().to_string(),
                author: author.trim().to_string(),
                created_by: user.user_id.clone(),
            },
        )
        .await?;

    tracing::info!(
        "Comment {} created in workspace {} by {}",
        comment.id,
        access.workspace_id,
        user.user_id
    );

    Ok(response.success(json!({ "comment": comment })))
}
