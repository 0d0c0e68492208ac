//! Post entity - an article inside a blog

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::Blog;
use crate::query::{FilterValue, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blog_id: Uuid,
    /// Denormalized name of the owning blog
    pub blog_name: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub const SORTABLE_FIELDS: &'static [&'static str] = &[
        "title",
        "shortDescription",
        "content",
        "blogId",
        "blogName",
        "createdAt",
    ];

    /// Create a post inside `blog`
    pub fn new(title: String, short_description: String, content: String, blog: &Blog) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            short_description,
            content,
            blog_id: blog.id,
            blog_name: blog.name.clone(),
            created_at: Utc::now(),
        }
    }

    /// Replace the editable fields, possibly moving the post to another blog
    pub fn update(&mut self, title: String, short_description: String, content: String, blog: &Blog) {
        self.title = title;
        self.short_description = short_description;
        self.content = content;
        self.blog_id = blog.id;
        self.blog_name = blog.name.clone();
    }
}

impl Record for Post {
    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "title" => Some(self.title.as_str().into()),
            "shortDescription" => Some(self.short_description.as_str().into()),
            "content" => Some(self.content.as_str().into()),
            "blogId" => Some(self.blog_id.into()),
            "blogName" => Some(self.blog_name.as_str().into()),
            "createdAt" => Some(self.created_at.into()),
            _ => None,
        }
    }
}
