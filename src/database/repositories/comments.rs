use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Comment;

const COMMENT_COLUMNS: &str =
    "id, workspace_id, text_id, content, author, created_by, created_at, updated_at";

/// Fields supplied by the caller when creating a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text_id: String,
    pub content: String,
    pub author: String,
    pub created_by: String,
}

/// Workspace-scoped persistence for comments.
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_workspace(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<Comment>, DatabaseError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments \
             WHERE workspace_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    pub async fn get_by_text(
        &self,
        workspace_id: &str,
        text_id: &str,
    ) -> Result<Vec<Comment>, DatabaseError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments \
             WHERE workspace_id = $1 AND text_id = $2 \
             ORDER BY created_at DESC"
        ))
        .bind(workspace_id)
        .bind(text_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    pub async fn get_by_id(
        &self,
        id: &str,
        workspace_id: &str,
    ) -> Result<Option<Comment>, DatabaseError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments \
             WHERE id = $1 AND workspace_id = $2"
        ))
        .bind(id)
        .bind(workspace_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    /// Insert a new comment; id and timestamps are assigned by the store.
    /// The referenced text is not checked to exist (orphans are tolerated).
    pub async fn create(
        &self,
        workspace_id: &str,
        data: NewComment,
    ) -> Result<Comment, DatabaseError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (workspace_id, text_id, content, author, created_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW()) \
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(workspace_id)
        .bind(data.text_id)
        .bind(data.content)
        .bind(data.author)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    /// Returns whether a row was actually removed.
    pub async fn delete(&self, id: &str, workspace_id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND workspace_id = $2")
            .bind(id)
            .bind(workspace_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self, workspace_id: &str) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE workspace_id = $1")
                .bind(workspace_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn count_by_text(
        &self,
        workspace_id: &str,
        text_id: &str,
    ) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments WHERE workspace_id = $1 AND text_id = $2",
        )
        .bind(workspace_id)
        .bind(text_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
