//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use blog_core::entities::Post;
use blog_core::error::DomainError;
use blog_core::query::{ListQuery, Page};
use blog_core::traits::{PostRepository, RepoResult};

use crate::models::PostModel;
use crate::query::{fetch_page, Columns};

use super::error::{is_foreign_key_violation, map_db_error};

const SELECT: &str = "id, blog_id, blog_name, title, short_description, content, created_at";

const COLUMNS: Columns = Columns::new(&[
    ("id", "id"),
    ("title", "title"),
    ("shortDescription", "short_description"),
    ("content", "content"),
    ("blogId", "blog_id"),
    ("blogName", "blog_name"),
    ("createdAt", "created_at"),
]);

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, blog_id, blog_name, title, short_description, content, created_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Post>> {
        fetch_page::<PostModel, Post>(&self.pool, "posts", SELECT, query, &COLUMNS).await
    }

    #[instrument(skip(self, post), fields(post_id = %post.id, blog_id = %post.blog_id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, blog_id, blog_name, title, short_description, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(post.id)
        .bind(post.blog_id)
        .bind(&post.blog_name)
        .bind(&post.title)
        .bind(&post.short_description)
        .bind(&post.content)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::BlogNotFound(post.blog_id)
            } else {
                map_db_error(e)
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET blog_id = $2, blog_name = $3, title = $4, short_description = $5, content = $6
            WHERE id = $1
            ",
        )
        .bind(post.id)
        .bind(post.blog_id)
        .bind(&post.blog_name)
        .bind(&post.title)
        .bind(&post.short_description)
        .bind(&post.content)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn rename_blog(&self, blog_id: Uuid, blog_name: &str) -> RepoResult<u64> {
        let result = sqlx::query("UPDATE posts SET blog_name = $2 WHERE blog_id = $1")
            .bind(blog_id)
            .bind(blog_name)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
