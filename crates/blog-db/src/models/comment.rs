//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub user_login: String,
    pub created_at: DateTime<Utc>,
}
