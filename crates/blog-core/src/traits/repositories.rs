//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Updates and deletes report whether a row
//! matched; callers turn `false` into their own not-found outcome.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{
    Blog, Comment, DeviceSession, EmailConfirmation, LikeStatus, PasswordRecovery, Post,
    ReactableKind, ReactionSet, ReactionTarget, User,
};
use crate::error::DomainError;
use crate::query::{ListQuery, Page};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Blog Repository
// ============================================================================

#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Find blog by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Blog>>;

    /// Filtered, sorted page of blogs
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Blog>>;

    /// Create a new blog
    async fn create(&self, blog: &Blog) -> RepoResult<()>;

    /// Update an existing blog
    async fn update(&self, blog: &Blog) -> RepoResult<bool>;

    /// Delete a blog together with its posts
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>>;

    /// Filtered, sorted page of posts (filter on `blogId` for a blog's posts)
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Post>>;

    async fn create(&self, post: &Post) -> RepoResult<()>;

    async fn update(&self, post: &Post) -> RepoResult<bool>;

    /// Delete a post together with its comments and reactions
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;

    /// Refresh the denormalized blog name on every post of a blog
    async fn rename_blog(&self, blog_id: Uuid, blog_name: &str) -> RepoResult<u64>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comment>>;

    /// Filtered, sorted page of comments (filter on `postId` for a post's comments)
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Comment>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    async fn update_content(&self, id: Uuid, content: &str) -> RepoResult<bool>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find users by a set of IDs (order unspecified)
    async fn find_by_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<User>>;

    /// Find user whose login or email equals `value`
    async fn find_by_login_or_email(&self, value: &str) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find the user holding an email confirmation code
    async fn find_by_confirmation_code(&self, code: &str) -> RepoResult<Option<User>>;

    /// Find the user holding a password recovery code
    async fn find_by_recovery_code(&self, code: &str) -> RepoResult<Option<User>>;

    /// Check if login is already taken
    async fn login_exists(&self, login: &str) -> RepoResult<bool>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Filtered, sorted page of users
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;

    /// Replace the email confirmation state
    async fn update_confirmation(
        &self,
        id: Uuid,
        confirmation: &EmailConfirmation,
    ) -> RepoResult<bool>;

    /// Store or clear a password recovery request
    async fn update_recovery(
        &self,
        id: Uuid,
        recovery: Option<&PasswordRecovery>,
    ) -> RepoResult<bool>;

    /// Update password hash and drop any pending recovery
    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<bool>;

    /// Delete a user and their sessions
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Reaction buckets of one target (empty if none stored)
    async fn find_set(&self, target: ReactionTarget) -> RepoResult<ReactionSet>;

    /// Reaction buckets for many targets of the same kind
    async fn find_sets(
        &self,
        kind: ReactableKind,
        ids: &[Uuid],
    ) -> RepoResult<HashMap<Uuid, ReactionSet>>;

    /// Move `user_id` to the bucket for `status`.
    ///
    /// Returns `false` if the target no longer exists.
    async fn apply(
        &self,
        target: ReactionTarget,
        user_id: Uuid,
        status: LikeStatus,
        at: DateTime<Utc>,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &DeviceSession) -> RepoResult<()>;

    async fn find_by_device(&self, device_id: Uuid) -> RepoResult<Option<DeviceSession>>;

    /// Advance a session's token lineage.
    ///
    /// Only succeeds while the stored issue time still equals `expected_issued_at`,
    /// so two concurrent refreshes of one token cannot both win.
    async fn rotate(
        &self,
        device_id: Uuid,
        expected_issued_at: DateTime<Utc>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<bool>;

    /// All sessions of a user, oldest first
    async fn list_by_user(&self, user_id: Uuid) -> RepoResult<Vec<DeviceSession>>;

    async fn delete(&self, device_id: Uuid) -> RepoResult<bool>;

    /// Delete every session of `user_id` except `keep_device_id`
    async fn delete_all_except(&self, user_id: Uuid, keep_device_id: Uuid) -> RepoResult<u64>;

    async fn delete_all_for_user(&self, user_id: Uuid) -> RepoResult<u64>;
}

// ============================================================================
// Maintenance
// ============================================================================

/// Store-wide operations used by the testing endpoint
#[async_trait]
pub trait DataMaintenance: Send + Sync {
    /// Remove every stored record
    async fn clear_all(&self) -> RepoResult<()>;
}
