//! PostgreSQL implementation of SessionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use blog_core::entities::DeviceSession;
use blog_core::error::DomainError;
use blog_core::traits::{RepoResult, SessionRepository};

use crate::models::DeviceSessionModel;

use super::error::{is_foreign_key_violation, map_db_error};

/// PostgreSQL implementation of SessionRepository
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, session), fields(device_id = %session.device_id, user_id = %session.user_id))]
    async fn create(&self, session: &DeviceSession) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO device_sessions (device_id, user_id, issued_at, expires_at,
                                         device_name, ip, last_active_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(session.device_id)
        .bind(session.user_id)
        .bind(session.issued_at)
        .bind(session.expires_at)
        .bind(&session.device_name)
        .bind(&session.ip)
        .bind(session.last_active_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::UserNotFound(session.user_id)
            } else {
                map_db_error(e)
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_device(&self, device_id: Uuid) -> RepoResult<Option<DeviceSession>> {
        let result = sqlx::query_as::<_, DeviceSessionModel>(
            r"
            SELECT device_id, user_id, issued_at, expires_at, device_name, ip, last_active_at
            FROM device_sessions
            WHERE device_id = $1
            ",
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(DeviceSession::from))
    }

    #[instrument(skip(self))]
    async fn rotate(
        &self,
        device_id: Uuid,
        expected_issued_at: DateTime<Utc>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE device_sessions
            SET issued_at = $3, expires_at = $4, last_active_at = $3
            WHERE device_id = $1 AND issued_at = $2
            ",
        )
        .bind(device_id)
        .bind(expected_issued_at)
        .bind(issued_at)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: Uuid) -> RepoResult<Vec<DeviceSession>> {
        let results = sqlx::query_as::<_, DeviceSessionModel>(
            r"
            SELECT device_id, user_id, issued_at, expires_at, device_name, ip, last_active_at
            FROM device_sessions
            WHERE user_id = $1
            ORDER BY issued_at, device_id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DeviceSession::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, device_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM device_sessions WHERE device_id = $1")
            .bind(device_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_all_except(&self, user_id: Uuid, keep_device_id: Uuid) -> RepoResult<u64> {
        let result =
            sqlx::query("DELETE FROM device_sessions WHERE user_id = $1 AND device_id <> $2")
                .bind(user_id)
                .bind(keep_device_id)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_all_for_user(&self, user_id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM device_sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
