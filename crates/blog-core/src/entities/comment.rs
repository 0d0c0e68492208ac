//! Comment entity - a user's comment under a post

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::query::{FilterValue, Record};

/// Author snapshot stored with the comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentatorInfo {
    pub user_id: Uuid,
    pub user_login: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub commentator: CommentatorInfo,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["content", "createdAt"];

    pub fn new(post_id: Uuid, content: String, commentator: CommentatorInfo) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            content,
            commentator,
            created_at: Utc::now(),
        }
    }

    /// Check if `user_id` wrote this comment
    #[inline]
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.commentator.user_id == user_id
    }
}

impl Record for Comment {
    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "postId" => Some(self.post_id.into()),
            "content" => Some(self.content.as_str().into()),
            "userId" => Some(self.commentator.user_id.into()),
            "userLogin" => Some(self.commentator.user_login.as_str().into()),
            "createdAt" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_authored_by() {
        let author = Uuid::new_v4();
        let comment = Comment::new(
            Uuid::new_v4(),
            "a comment that is long enough".to_string(),
            CommentatorInfo {
                user_id: author,
                user_login: "writer".to_string(),
            },
        );
        assert!(comment.is_authored_by(author));
        assert!(!comment.is_authored_by(Uuid::new_v4()));
    }
}
