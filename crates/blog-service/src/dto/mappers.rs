//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Views that need reaction data are assembled by the reaction service.

use blog_core::entities::{Blog, Comment, DeviceSession, LikesInfo, User};

use super::responses::{BlogView, CommentatorInfoView, DeviceView, LikesInfoView, MeView, UserView};

impl From<&Blog> for BlogView {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id,
            name: blog.name.clone(),
            description: blog.description.clone(),
            website_url: blog.website_url.clone(),
            created_at: blog.created_at,
            is_membership: blog.is_membership,
        }
    }
}

impl From<Blog> for BlogView {
    fn from(blog: Blog) -> Self {
        Self::from(&blog)
    }
}

impl From<LikesInfo> for LikesInfoView {
    fn from(info: LikesInfo) -> Self {
        Self {
            likes_count: info.likes_count,
            dislikes_count: info.dislikes_count,
            my_status: info.my_status,
        }
    }
}

impl From<&Comment> for CommentatorInfoView {
    fn from(comment: &Comment) -> Self {
        Self {
            user_id: comment.commentator.user_id,
            user_login: comment.commentator.user_login.clone(),
        }
    }
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for MeView {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            login: user.login.clone(),
            user_id: user.id,
        }
    }
}

impl From<&DeviceSession> for DeviceView {
    fn from(session: &DeviceSession) -> Self {
        Self {
            ip: session.ip.clone(),
            title: session.device_name.clone(),
            last_active_date: session.last_active_at,
            device_id: session.device_id,
        }
    }
}
