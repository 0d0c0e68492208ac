//! Blog, post, and comment model -> entity mappers

use blog_core::entities::{Blog, Comment, CommentatorInfo, Post};

use crate::models::{BlogModel, CommentModel, PostModel};

impl From<BlogModel> for Blog {
    fn from(model: BlogModel) -> Self {
        Blog {
            id: model.id,
            name: model.name,
            description: model.description,
            website_url: model.website_url,
            created_at: model.created_at,
            is_membership: model.is_membership,
        }
    }
}

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: model.id,
            title: model.title,
            short_description: model.short_description,
            content: model.content,
            blog_id: model.blog_id,
            blog_name: model.blog_name,
            created_at: model.created_at,
        }
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: model.id,
            post_id: model.post_id,
            content: model.content,
            commentator: CommentatorInfo {
                user_id: model.user_id,
                user_login: model.user_login,
            },
            created_at: model.created_at,
        }
    }
}
