//! In-memory store
//!
//! Every table sits behind one `RwLock`, so cascades and the reaction
//! read-modify-write happen atomically. Cloning shares the same tables.

mod repositories;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use blog_core::entities::{
    Blog, Comment, DeviceSession, Post, ReactableKind, ReactionSet, ReactionTarget, User,
};
use blog_core::query::{FilterValue, ListQuery, Page, Record, SortDirection};

#[derive(Debug, Clone)]
pub(crate) struct StoredUser {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub blogs: HashMap<Uuid, Blog>,
    pub posts: HashMap<Uuid, Post>,
    pub comments: HashMap<Uuid, Comment>,
    pub users: HashMap<Uuid, StoredUser>,
    pub reactions: HashMap<ReactionTarget, ReactionSet>,
    pub sessions: HashMap<Uuid, DeviceSession>,
}

impl Tables {
    /// Remove a comment and its reactions
    pub fn remove_comment(&mut self, id: Uuid) -> bool {
        self.reactions.remove(&ReactionTarget::comment(id));
        self.comments.remove(&id).is_some()
    }

    /// Remove a post, its comments, and every related reaction
    pub fn remove_post(&mut self, id: Uuid) -> bool {
        let comment_ids: Vec<Uuid> = self
            .comments
            .values()
            .filter(|c| c.post_id == id)
            .map(|c| c.id)
            .collect();
        for comment_id in comment_ids {
            self.remove_comment(comment_id);
        }
        self.reactions.remove(&ReactionTarget::post(id));
        self.posts.remove(&id).is_some()
    }

    /// Remove a blog and everything under it
    pub fn remove_blog(&mut self, id: Uuid) -> bool {
        let post_ids: Vec<Uuid> = self
            .posts
            .values()
            .filter(|p| p.blog_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in post_ids {
            self.remove_post(post_id);
        }
        self.blogs.remove(&id).is_some()
    }

    pub fn target_exists(&self, target: ReactionTarget) -> bool {
        match target.kind {
            ReactableKind::Post => self.posts.contains_key(&target.id),
            ReactableKind::Comment => self.comments.contains_key(&target.id),
        }
    }
}

/// Shared in-memory backend implementing every repository trait
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        f(&*self.inner.read())
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        f(&mut *self.inner.write())
    }
}

fn sort_key<R: Record>(record: &R, field: &str) -> (Option<FilterValue>, Option<FilterValue>) {
    (record.field(field), record.field("id"))
}

/// Filter, sort, and paginate records the way the SQL backend does
pub(crate) fn select_page<'a, R, I>(records: I, query: &ListQuery) -> Page<R>
where
    R: Record + Clone + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut matched: Vec<&R> = records
        .into_iter()
        .filter(|r| query.filter.as_ref().map_or(true, |f| f.matches(*r)))
        .collect();

    let field = query.sort.field;
    matched.sort_by_cached_key(|r| sort_key(*r, field));
    if query.sort.direction == SortDirection::Desc {
        matched.reverse();
    }

    let total = matched.len() as u64;
    let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
    let items = matched
        .into_iter()
        .skip(offset)
        .take(query.page.page_size() as usize)
        .cloned()
        .collect();

    Page::new(items, total, query.page)
}
