//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub blog_name: String,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
