//! PostgreSQL implementation of ReactionRepository
//!
//! One row per (entity, user) whose `status` names the bucket. Like and
//! Dislike upsert the row; None only rewrites an existing row, so a user
//! who never reacted stays absent.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use blog_core::entities::{LikeStatus, ReactableKind, ReactionSet, ReactionTarget};
use blog_core::traits::{ReactionRepository, RepoResult};

use crate::mappers::group_reactions;
use crate::models::ReactionModel;

use super::error::{is_foreign_key_violation, map_db_error};

/// Reaction table, key column, and parent table for a kind
const fn table_for(kind: ReactableKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        ReactableKind::Post => ("post_reactions", "post_id", "posts"),
        ReactableKind::Comment => ("comment_reactions", "comment_id", "comments"),
    }
}

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn target_exists(&self, target: ReactionTarget) -> RepoResult<bool> {
        let (_, _, parent) = table_for(target.kind);
        sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM {parent} WHERE id = $1)"
        ))
        .bind(target.id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find_set(&self, target: ReactionTarget) -> RepoResult<ReactionSet> {
        let mut sets = self.find_sets(target.kind, &[target.id]).await?;
        Ok(sets.remove(&target.id).unwrap_or_default())
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_sets(
        &self,
        kind: ReactableKind,
        ids: &[Uuid],
    ) -> RepoResult<HashMap<Uuid, ReactionSet>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let (table, key, _) = table_for(kind);
        let rows = sqlx::query_as::<_, ReactionModel>(&format!(
            r"
            SELECT {key} AS entity_id, user_id, status, created_at
            FROM {table}
            WHERE {key} = ANY($1)
            ORDER BY created_at
            "
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        group_reactions(rows)
    }

    #[instrument(skip(self))]
    async fn apply(
        &self,
        target: ReactionTarget,
        user_id: Uuid,
        status: LikeStatus,
        at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let (table, key, _) = table_for(target.kind);

        if status == LikeStatus::None {
            let result = sqlx::query(&format!(
                "UPDATE {table} SET status = $3, created_at = $4 WHERE {key} = $1 AND user_id = $2"
            ))
            .bind(target.id)
            .bind(user_id)
            .bind(status.as_str())
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() > 0 {
                return Ok(true);
            }
            // nothing to withdraw; still report whether the target exists
            return self.target_exists(target).await;
        }

        let result = sqlx::query(&format!(
            r"
            INSERT INTO {table} ({key}, user_id, status, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ({key}, user_id)
            DO UPDATE SET status = EXCLUDED.status, created_at = EXCLUDED.created_at
            "
        ))
        .bind(target.id)
        .bind(user_id)
        .bind(status.as_str())
        .bind(at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) if is_foreign_key_violation(&e) => Ok(false),
            Err(e) => Err(map_db_error(e)),
        }
    }
}
