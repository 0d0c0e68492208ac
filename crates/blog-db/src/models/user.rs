//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for users table (without the password hash)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: Uuid,
    pub login: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub is_confirmed: bool,
    pub confirmation_code: Option<String>,
    pub confirmation_expires_at: Option<DateTime<Utc>>,
    pub recovery_code: Option<String>,
    pub recovery_expires_at: Option<DateTime<Utc>>,
}
