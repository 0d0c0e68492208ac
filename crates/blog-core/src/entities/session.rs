//! Device session - one logged-in device and its refresh-token lineage

use chrono::{DateTime, Duration, DurationRound, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSession {
    pub device_id: Uuid,
    pub user_id: Uuid,
    /// Issue time of the only refresh token accepted for this device
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub device_name: String,
    pub ip: String,
    pub last_active_at: DateTime<Utc>,
}

impl DeviceSession {
    /// Start a session for a new device, valid for `ttl`
    pub fn new(user_id: Uuid, ip: String, device_name: String, ttl: Duration) -> Self {
        let issued_at = whole_seconds(Utc::now());
        Self {
            device_id: Uuid::new_v4(),
            user_id,
            issued_at,
            expires_at: issued_at + ttl,
            device_name,
            ip,
            last_active_at: issued_at,
        }
    }

    #[inline]
    pub fn belongs_to(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Check a refresh token's `iat` (unix seconds) against the current lineage
    pub fn is_current_token(&self, iat: i64) -> bool {
        self.issued_at.timestamp() == iat
    }

    /// Issue time for the next rotation.
    ///
    /// Strictly later than the current one so a replayed token never
    /// matches again, even within the same second.
    pub fn next_issued_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let now = whole_seconds(now);
        if now > self.issued_at {
            now
        } else {
            self.issued_at + Duration::seconds(1)
        }
    }

    /// Apply a rotation
    pub fn rotate(&mut self, issued_at: DateTime<Utc>, ttl: Duration) {
        self.issued_at = issued_at;
        self.expires_at = issued_at + ttl;
        self.last_active_at = issued_at;
    }
}

/// JWT timestamps carry whole seconds
fn whole_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    at.duration_trunc(Duration::seconds(1)).unwrap_or(at)
}
