use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{response_with_tokens, AuthUser};
use crate::validation::{require_str, validate_required_fields};
use crate::workspace::{verify_workspace_token, WorkspaceRole};
use crate::AppState;

/// POST /call/getTexts - list the workspace's texts, newest first
pub async fn get_texts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    validate_required_fields(&payload, &["workspaceToken"])?;

    let workspace_token = require_str(&payload, "workspaceToken")?;
    let access = verify_workspace_token(workspace_token, &user.user_id, WorkspaceRole::Editor)?;
    let response = response_with_tokens(access.tokens);

    let texts = state.db.texts().get_by_workspace(&access.workspace_id).await?;

    Ok(response.success(json!({ "texts": texts })))
}
