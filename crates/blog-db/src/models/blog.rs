//! Blog database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for blogs table
#[derive(Debug, Clone, FromRow)]
pub struct BlogModel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub website_url: String,
    pub is_membership: bool,
    pub created_at: DateTime<Utc>,
}
