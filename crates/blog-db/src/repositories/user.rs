//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use blog_core::entities::{EmailConfirmation, PasswordRecovery, User};
use blog_core::error::DomainError;
use blog_core::query::{ListQuery, Page};
use blog_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;
use crate::query::{fetch_page, Columns};

use super::error::{map_db_error, map_unique_violation};

const SELECT: &str = "id, login, email, created_at, is_confirmed, confirmation_code, \
                      confirmation_expires_at, recovery_code, recovery_expires_at";

const COLUMNS: Columns = Columns::new(&[
    ("id", "id"),
    ("login", "login"),
    ("email", "email"),
    ("createdAt", "created_at"),
    ("isConfirmed", "is_confirmed"),
]);

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, condition: &str, value: &str) -> RepoResult<Option<User>> {
        let result =
            sqlx::query_as::<_, UserModel>(&format!("SELECT {SELECT} FROM users WHERE {condition}"))
                .bind(value)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {SELECT} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {SELECT} FROM users WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_login_or_email(&self, value: &str) -> RepoResult<Option<User>> {
        self.find_one("login = $1 OR email = $1", value).await
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one("email = $1", email).await
    }

    #[instrument(skip(self, code))]
    async fn find_by_confirmation_code(&self, code: &str) -> RepoResult<Option<User>> {
        self.find_one("confirmation_code = $1", code).await
    }

    #[instrument(skip(self, code))]
    async fn find_by_recovery_code(&self, code: &str) -> RepoResult<Option<User>> {
        self.find_one("recovery_code = $1", code).await
    }

    #[instrument(skip(self))]
    async fn login_exists(&self, login: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE login = $1)")
            .bind(login)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<User>> {
        fetch_page::<UserModel, User>(&self.pool, "users", SELECT, query, &COLUMNS).await
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let recovery = user.password_recovery.as_ref();
        sqlx::query(
            r"
            INSERT INTO users (id, login, email, password_hash, created_at, is_confirmed,
                               confirmation_code, confirmation_expires_at,
                               recovery_code, recovery_expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(user.id)
        .bind(&user.login)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.created_at)
        .bind(user.email_confirmation.is_confirmed)
        .bind(&user.email_confirmation.code)
        .bind(user.email_confirmation.expires_at)
        .bind(recovery.map(|r| r.code.as_str()))
        .bind(recovery.map(|r| r.expires_at))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                Some("users_login_key") => DomainError::LoginAlreadyExists,
                _ => DomainError::EmailAlreadyExists,
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, confirmation))]
    async fn update_confirmation(
        &self,
        id: Uuid,
        confirmation: &EmailConfirmation,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET is_confirmed = $2, confirmation_code = $3, confirmation_expires_at = $4
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(confirmation.is_confirmed)
        .bind(&confirmation.code)
        .bind(confirmation.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, recovery))]
    async fn update_recovery(
        &self,
        id: Uuid,
        recovery: Option<&PasswordRecovery>,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET recovery_code = $2, recovery_expires_at = $3
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(recovery.map(|r| r.code.as_str()))
        .bind(recovery.map(|r| r.expires_at))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, recovery_code = NULL, recovery_expires_at = NULL
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        // device_sessions cascade
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
