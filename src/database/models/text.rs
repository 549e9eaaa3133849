use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A text owned by exactly one workspace. Identifiers are opaque strings
/// assigned by the store; timestamps are server-side.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Text {
    pub id: String,
    pub workspace_id: String,
    pub title: Option<String>,
    pub content: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
