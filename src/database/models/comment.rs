use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A comment on a text, scoped to the same workspace.
///
/// `text_id` is a plain reference, not a foreign key: deleting a text leaves
/// its comments behind and the UI renders them against a "deleted text".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: String,
    pub workspace_id: String,
    pub text_id: String,
    pub content: String,
    pub author: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
