//! Store-wide maintenance for PostgreSQL

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::traits::{DataMaintenance, RepoResult};

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgMaintenance {
    pool: PgPool,
}

impl PgMaintenance {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataMaintenance for PgMaintenance {
    #[instrument(skip(self))]
    async fn clear_all(&self) -> RepoResult<()> {
        sqlx::query(
            r"
            TRUNCATE blogs, posts, comments, post_reactions, comment_reactions,
                     users, device_sessions
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        tracing::warn!("All stored data was cleared");
        Ok(())
    }
}
