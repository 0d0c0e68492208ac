//! Request DTOs for API endpoints
//!
//! Text inputs are trimmed while deserializing, so the length rules below
//! apply to the trimmed value and a blank string fails `min = 1`. Absent
//! fields deserialize as empty, which lets validation name every one of them.

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use blog_core::entities::LikeStatus;
use blog_core::query::{Filter, ListQuery, PageRequest, Sort, SortDirection};

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

fn https_url(value: &str) -> Result<(), ValidationError> {
    if value.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::new("https_url").with_message("websiteUrl must use https".into()))
    }
}

fn login_charset(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(ValidationError::new("login_charset")
            .with_message("login may contain only letters, digits, _ and -".into()))
    }
}

fn like_status_value(value: &str) -> Result<(), ValidationError> {
    value.parse::<LikeStatus>().map(|_| ()).map_err(|_| {
        ValidationError::new("like_status").with_message("likeStatus must be None, Like or Dislike".into())
    })
}

// ============================================================================
// Listing
// ============================================================================

/// Query-string parameters shared by list endpoints.
///
/// Values are taken leniently: anything unparsable falls back to its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page_number: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub search_name_term: Option<String>,
    pub search_login_term: Option<String>,
    pub search_email_term: Option<String>,
}

impl ListParams {
    fn number(value: Option<&str>) -> u32 {
        value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
    }

    fn term(value: Option<&String>) -> Option<&str> {
        value.map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// Sort and page part of the query, with sorting limited to `sortable`
    pub fn to_list_query(&self, sortable: &[&'static str]) -> ListQuery {
        let direction = SortDirection::parse_or_default(self.sort_direction.as_deref());
        let sort = Sort::resolve(self.sort_by.as_deref(), sortable, direction);
        let page = PageRequest::new(
            Self::number(self.page_number.as_deref()),
            Self::number(self.page_size.as_deref()),
        );
        ListQuery::new(sort, page)
    }

    /// Case-insensitive name search
    pub fn name_filter(&self) -> Option<Filter> {
        Self::term(self.search_name_term.as_ref()).map(|term| Filter::contains("name", term))
    }

    /// Login and email searches, OR-combined
    pub fn login_or_email_filter(&self) -> Option<Filter> {
        let mut filters = Vec::new();
        if let Some(term) = Self::term(self.search_login_term.as_ref()) {
            filters.push(Filter::contains("login", term));
        }
        if let Some(term) = Self::term(self.search_email_term.as_ref()) {
            filters.push(Filter::contains("email", term));
        }
        Filter::any_of(filters)
    }
}

// ============================================================================
// Blog Requests
// ============================================================================

/// Create or replace a blog
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 15, message = "name must be 1-15 characters"))]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 500, message = "description must be 1-500 characters"))]
    pub description: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(
        url(message = "websiteUrl must be a valid URL"),
        length(max = 100, message = "websiteUrl must be at most 100 characters"),
        custom(function = "https_url")
    )]
    pub website_url: String,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Post body used under `/blogs/:id/posts`, where the blog comes from the path
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPostInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 30, message = "title must be 1-30 characters"))]
    pub title: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "shortDescription must be 1-100 characters"))]
    pub short_description: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 1000, message = "content must be 1-1000 characters"))]
    pub content: String,
}

/// Create or replace a post
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct PostInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 30, message = "title must be 1-30 characters"))]
    pub title: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "shortDescription must be 1-100 characters"))]
    pub short_description: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 1000, message = "content must be 1-1000 characters"))]
    pub content: String,

    /// Checked against stored blogs by the service
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "blogId is required"))]
    pub blog_id: String,
}

impl PostInput {
    pub fn into_parts(self) -> (BlogPostInput, String) {
        (
            BlogPostInput {
                title: self.title,
                short_description: self.short_description,
                content: self.content,
            },
            self.blog_id,
        )
    }
}

// ============================================================================
// Comment Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 20, max = 300, message = "content must be 20-300 characters"))]
    pub content: String,
}

/// Body of the like-status endpoints
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct LikeStatusInput {
    #[validate(custom(function = "like_status_value"))]
    pub like_status: String,
}

impl LikeStatusInput {
    /// Parsed status; only call after validation
    pub fn status(&self) -> LikeStatus {
        self.like_status.parse().unwrap_or_default()
    }
}

// ============================================================================
// User and Auth Requests
// ============================================================================

/// Admin-created user or self-registration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        length(min = 3, max = 10, message = "login must be 3-10 characters"),
        custom(function = "login_charset")
    )]
    pub login: String,

    #[validate(length(min = 6, max = 20, message = "password must be 6-20 characters"))]
    pub password: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "loginOrEmail is required"))]
    pub login_or_email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfirmationInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
}

/// Email-only body for resending and password recovery
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct NewPasswordInput {
    #[validate(length(min = 6, max = 20, message = "newPassword must be 6-20 characters"))]
    pub new_password: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "recoveryCode is required"))]
    pub recovery_code: String,
}
