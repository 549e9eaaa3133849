use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{response_with_tokens, AuthUser};
use crate::validation::{optional_str, require_str, validate_required_fields};
use crate::workspace::{verify_workspace_token, WorkspaceRole};
use crate::AppState;

/// POST /call/getComments - list comments, newest first
///
/// With `text_id` the listing is restricted to that text; otherwise every
/// comment in the workspace is returned.
pub async fn get_comments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    validate_required_fields(&payload, &["workspaceToken"])?;

    let workspace_token = require_str(&payload, "workspaceToken")?;
    let access = verify_workspace_token(workspace_token, &user.user_id, WorkspaceRole::Editor)?;
    let response = response_with_tokens(access.tokens);

    let text_id = optional_str(&payload, "text_id")?;

    let comments = match text_id {
        Some(text_id) => {
            state
                .db
                .comments()
                .get_by_text(&access.workspace_id, text_id)
                .await?
        }
        None => {
            state
                .db
                .comments()
                .get_by_workspace(&access.workspace_id)
                .await?
        }
    };

    Ok(response.success(json!({ "comments": comments })))
}
