//! Reaction database model
//!
//! Shared by `post_reactions` and `comment_reactions`; queries alias the
//! key column to `entity_id`.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub entity_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
