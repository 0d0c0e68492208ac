//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use blog_core::entities::Comment;
use blog_core::error::DomainError;
use blog_core::query::{ListQuery, Page};
use blog_core::traits::{CommentRepository, RepoResult};

use crate::models::CommentModel;
use crate::query::{fetch_page, Columns};

use super::error::{is_foreign_key_violation, map_db_error};

const SELECT: &str = "id, post_id, content, user_id, user_login, created_at";

const COLUMNS: Columns = Columns::new(&[
    ("id", "id"),
    ("postId", "post_id"),
    ("content", "content"),
    ("userId", "user_id"),
    ("userLogin", "user_login"),
    ("createdAt", "created_at"),
]);

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, content, user_id, user_login, created_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Comment>> {
        fetch_page::<CommentModel, Comment>(&self.pool, "comments", SELECT, query, &COLUMNS).await
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, post_id = %comment.post_id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (id, post_id, content, user_id, user_login, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(comment.id)
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(comment.commentator.user_id)
        .bind(&comment.commentator.user_login)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // the post was deleted between the existence check and this insert
            if is_foreign_key_violation(&e) {
                DomainError::PostNotFound(comment.post_id)
            } else {
                map_db_error(e)
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self, content))]
    async fn update_content(&self, id: Uuid, content: &str) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE comments SET content = $2 WHERE id = $1")
            .bind(id)
            .bind(content)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
