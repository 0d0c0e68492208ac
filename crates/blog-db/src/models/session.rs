//! Device session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for device_sessions table
#[derive(Debug, Clone, FromRow)]
pub struct DeviceSessionModel {
    pub device_id: Uuid,
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub device_name: String,
    pub ip: String,
    pub last_active_at: DateTime<Utc>,
}
