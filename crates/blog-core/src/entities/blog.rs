//! Blog entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::query::{FilterValue, Record};

/// A blog owning a list of posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub website_url: String,
    pub created_at: DateTime<Utc>,
    pub is_membership: bool,
}

impl Blog {
    /// Fields accepted by `sortBy`
    pub const SORTABLE_FIELDS: &'static [&'static str] =
        &["name", "description", "websiteUrl", "createdAt"];

    pub fn new(name: String, description: String, website_url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            website_url,
            created_at: Utc::now(),
            is_membership: false,
        }
    }

    /// Replace the editable fields
    pub fn update(&mut self, name: String, description: String, website_url: String) {
        self.name = name;
        self.description = description;
        self.website_url = website_url;
    }
}

impl Record for Blog {
    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "websiteUrl" => Some(self.website_url.as_str().into()),
            "createdAt" => Some(self.created_at.into()),
            "isMembership" => Some(self.is_membership.into()),
            _ => None,
        }
    }
}
