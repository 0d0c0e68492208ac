//! User entity - a registered account
//!
//! The password hash lives beside the user in storage and is never part of
//! the entity.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::query::{FilterValue, Record};

/// Registration confirmation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfirmation {
    pub code: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_confirmed: bool,
}

impl EmailConfirmation {
    /// Already confirmed, no code outstanding
    pub fn confirmed() -> Self {
        Self {
            code: None,
            expires_at: None,
            is_confirmed: true,
        }
    }

    /// Pending confirmation with `code` valid for `ttl`
    pub fn pending(code: String, ttl: Duration) -> Self {
        Self {
            code: Some(code),
            expires_at: Some(Utc::now() + ttl),
            is_confirmed: false,
        }
    }

    /// Check if `code` confirms this account at `now`
    pub fn accepts(&self, code: &str, now: DateTime<Utc>) -> bool {
        !self.is_confirmed
            && self.code.as_deref() == Some(code)
            && self.expires_at.is_some_and(|exp| exp > now)
    }
}

/// Outstanding password recovery request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRecovery {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl PasswordRecovery {
    pub fn new(code: String, ttl: Duration) -> Self {
        Self {
            code,
            expires_at: Utc::now() + ttl,
        }
    }

    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub email_confirmation: EmailConfirmation,
    pub password_recovery: Option<PasswordRecovery>,
}

impl User {
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["login", "email", "createdAt"];

    /// Create a user with the given confirmation state
    pub fn new(login: String, email: String, email_confirmation: EmailConfirmation) -> Self {
        Self {
            id: Uuid::new_v4(),
            login,
            email,
            created_at: Utc::now(),
            email_confirmation,
            password_recovery: None,
        }
    }

    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmation.is_confirmed
    }
}

impl Record for User {
    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "login" => Some(self.login.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "createdAt" => Some(self.created_at.into()),
            "isConfirmed" => Some(self.email_confirmation.is_confirmed.into()),
            _ => None,
        }
    }
}
