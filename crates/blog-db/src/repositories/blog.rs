//! PostgreSQL implementation of BlogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use blog_core::entities::Blog;
use blog_core::query::{ListQuery, Page};
use blog_core::traits::{BlogRepository, RepoResult};

use crate::models::BlogModel;
use crate::query::{fetch_page, Columns};

use super::error::map_db_error;

const SELECT: &str = "id, name, description, website_url, is_membership, created_at";

const COLUMNS: Columns = Columns::new(&[
    ("id", "id"),
    ("name", "name"),
    ("description", "description"),
    ("websiteUrl", "website_url"),
    ("isMembership", "is_membership"),
    ("createdAt", "created_at"),
]);

/// PostgreSQL implementation of BlogRepository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Blog>> {
        let result = sqlx::query_as::<_, BlogModel>(
            r"
            SELECT id, name, description, website_url, is_membership, created_at
            FROM blogs
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Blog::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Blog>> {
        fetch_page::<BlogModel, Blog>(&self.pool, "blogs", SELECT, query, &COLUMNS).await
    }

    #[instrument(skip(self, blog), fields(blog_id = %blog.id))]
    async fn create(&self, blog: &Blog) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO blogs (id, name, description, website_url, is_membership, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(blog.id)
        .bind(&blog.name)
        .bind(&blog.description)
        .bind(&blog.website_url)
        .bind(blog.is_membership)
        .bind(blog.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, blog), fields(blog_id = %blog.id))]
    async fn update(&self, blog: &Blog) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE blogs
            SET name = $2, description = $3, website_url = $4
            WHERE id = $1
            ",
        )
        .bind(blog.id)
        .bind(&blog.name)
        .bind(&blog.description)
        .bind(&blog.website_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        // posts, their comments and reactions go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
