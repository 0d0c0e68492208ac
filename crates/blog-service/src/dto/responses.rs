//! Response DTOs for API endpoints
//!
//! All response DTOs serialize as camelCase JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use blog_core::entities::LikeStatus;
use blog_core::query::Page;

/// Paginated list envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T> {
    pub pages_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub items: Vec<T>,
}

impl<T> PageView<T> {
    /// Envelope for `page` whose items were already converted
    pub fn from_page<U>(page: &Page<U>, items: Vec<T>) -> Self {
        Self {
            pages_count: page.pages_count(),
            page: page.page_number,
            page_size: page.page_size,
            total_count: page.total_count,
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub website_url: String,
    pub created_at: DateTime<Utc>,
    pub is_membership: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesInfoView {
    pub likes_count: u64,
    pub dislikes_count: u64,
    pub my_status: LikeStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeDetailsView {
    pub added_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub login: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedLikesInfoView {
    pub likes_count: u64,
    pub dislikes_count: u64,
    pub my_status: LikeStatus,
    pub newest_likes: Vec<LikeDetailsView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blog_id: Uuid,
    pub blog_name: String,
    pub created_at: DateTime<Utc>,
    pub extended_likes_info: ExtendedLikesInfoView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentatorInfoView {
    pub user_id: Uuid,
    pub user_login: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub content: String,
    pub commentator_info: CommentatorInfoView,
    pub created_at: DateTime<Utc>,
    pub likes_info: LikesInfoView,
}

/// User as seen by the admin API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub login: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// `GET /auth/me`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeView {
    pub email: String,
    pub login: String,
    pub user_id: Uuid,
}

/// One active device session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    pub ip: String,
    pub title: String,
    pub last_active_date: DateTime<Utc>,
    pub device_id: Uuid,
}

/// Body returned by login and refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenView {
    pub access_token: String,
}

/// Tokens issued for a device session.
///
/// The API returns the access token in the body and the refresh token as a cookie.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl SessionTokens {
    pub fn body(&self) -> AccessTokenView {
        AccessTokenView {
            access_token: self.access_token.clone(),
        }
    }
}
