//! Test fixtures and data generators
//!
//! Request bodies mirror the API's camelCase wire format; response types
//! only declare the fields the tests look at.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
    pub email: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            login: format!("user{suffix}"),
            password: "secret123".to_string(),
            email: format!("user{suffix}@example.com"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login_or_email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            login_or_email: reg.login.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub name: String,
    pub description: String,
    pub website_url: String,
}

impl CreateBlogRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("blog {suffix}"),
            description: "Notes from the field".to_string(),
            website_url: format!("https://blog{suffix}.example.com"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub short_description: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn unique() -> Self {
        Self {
            title: format!("post {}", unique_suffix()),
            short_description: "A short summary".to_string(),
            content: "The body of the post".to_string(),
        }
    }
}

pub fn comment_body(content: &str) -> serde_json::Value {
    serde_json::json!({ "content": content })
}

pub fn like_body(status: &str) -> serde_json::Value {
    serde_json::json!({ "likeStatus": status })
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub pages_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub email: String,
    pub login: String,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub login: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub name: String,
    pub website_url: String,
    pub is_membership: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeDetails {
    pub user_id: Uuid,
    pub login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedLikesInfo {
    pub likes_count: u64,
    pub dislikes_count: u64,
    pub my_status: String,
    pub newest_likes: Vec<LikeDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub blog_id: Uuid,
    pub blog_name: String,
    pub extended_likes_info: ExtendedLikesInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesInfo {
    pub likes_count: u64,
    pub dislikes_count: u64,
    pub my_status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentatorInfo {
    pub user_id: Uuid,
    pub user_login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub commentator_info: CommentatorInfo,
    pub likes_info: LikesInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub ip: String,
    pub title: String,
    pub device_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct FieldError {
    pub message: String,
    pub field: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    pub errors_messages: Vec<FieldError>,
}

impl FieldErrors {
    pub fn fields(&self) -> Vec<&str> {
        self.errors_messages.iter().map(|e| e.field.as_str()).collect()
    }
}
