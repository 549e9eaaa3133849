use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::database::manager::DatabaseError;
use crate::database::models::Text;

const TEXT_COLUMNS: &str = "id, workspace_id, title, content, created_by, created_at, updated_at";

/// Fields supplied by the caller when creating a text.
#[derive(Debug, Clone)]
pub struct NewText {
    pub title: Option<String>,
    pub content: String,
    pub created_by: String,
}

/// Partial update; only provided fields are written.
#[derive(Debug, Clone, Default)]
pub struct TextChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl TextChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Workspace-scoped persistence for texts. Every statement filters on
/// `workspace_id` in addition to the entity id, so a leaked id from another
/// workspace never resolves.
pub struct TextRepository {
    pool: PgPool,
}

impl TextRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_workspace(&self, workspace_id: &str) -> Result<Vec<Text>, DatabaseError> {
        let texts = sqlx::query_as::<_, Text>(&format!(
            "SELECT {TEXT_COLUMNS} FROM texts \
             WHERE workspace_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(texts)
    }

    pub async fn get_by_id(
        &self,
        id: &str,
        workspace_id: &str,
    ) -> Result<Option<Text>, DatabaseError> {
        let text = sqlx::query_as::<_, Text>(&format!(
            "SELECT {TEXT_COLUMNS} FROM texts \
             WHERE id = $1 AND workspace_id = $2"
        ))
        .bind(id)
        .bind(workspace_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(text)
    }

    /// Insert a new text; id and timestamps are assigned by the store.
    pub async fn create(&self, workspace_id: &str, data: NewText) -> Result<Text, DatabaseError> {
        let text = sqlx::query_as::<_, Text>(&format!(
            "INSERT INTO texts (workspace_id, title, content, created_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) \
             RETURNING {TEXT_COLUMNS}"
        ))
        .bind(workspace_id)
        .bind(data.title)
        .bind(data.content)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(text)
    }

    /// Update the provided fields only, always refreshing `updated_at`.
    /// An empty change set degrades to a plain read of the current state.
    pub async fn update(
        &self,
        id: &str,
        workspace_id: &str,
        changes: TextChanges,
    ) -> Result<Option<Text>, DatabaseError> {
        if changes.is_empty() {
            return self.get_by_id(id, workspace_id).await;
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE texts SET ");
        let mut fields = builder.separated(", ");
        if let Some(title) = changes.title {
            fields.push("title = ");
            fields.push_bind_unseparated(title);
        }
        if let Some(content) = changes.content {
            fields.push("content = ");
            fields.push_bind_unseparated(content);
        }
        fields.push("updated_at = NOW()");

        builder.push(" WHERE id = ");
        builder.push_bind(id.to_string());
        builder.push(" AND workspace_id = ");
        builder.push_bind(workspace_id.to_string());
        builder.push(format!(" RETURNING {TEXT_COLUMNS}"));

        let text = builder
            .build_query_as::<Text>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(text)
    }

    /// Returns whether a row was actually removed, so callers can
    /// distinguish not-found from success.
    pub async fn delete(&self, id: &str, workspace_id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM texts WHERE id = $1 AND workspace_id = $2")
            .bind(id)
            .bind(workspace_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self, workspace_id: &str) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM texts WHERE workspace_id = $1")
                .bind(workspace_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
