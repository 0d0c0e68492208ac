//! Repository trait implementations for [`MemoryStore`]

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use blog_core::entities::{
    Blog, Comment, DeviceSession, EmailConfirmation, LikeStatus, PasswordRecovery, Post,
    ReactableKind, ReactionSet, ReactionTarget, Transition, User,
};
use blog_core::error::DomainError;
use blog_core::query::{ListQuery, Page};
use blog_core::traits::{
    BlogRepository, CommentRepository, DataMaintenance, PostRepository, ReactionRepository,
    RepoResult, SessionRepository, UserRepository,
};

use super::{select_page, MemoryStore, StoredUser, Tables};

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Blog>> {
        Ok(self.read(|t| t.blogs.get(&id).cloned()))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Blog>> {
        Ok(self.read(|t| select_page(t.blogs.values(), query)))
    }

    async fn create(&self, blog: &Blog) -> RepoResult<()> {
        self.write(|t| t.blogs.insert(blog.id, blog.clone()));
        Ok(())
    }

    async fn update(&self, blog: &Blog) -> RepoResult<bool> {
        Ok(self.write(|t| match t.blogs.get_mut(&blog.id) {
            Some(stored) => {
                *stored = blog.clone();
                true
            }
            None => false,
        }))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.write(|t| t.remove_blog(id)))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>> {
        Ok(self.read(|t| t.posts.get(&id).cloned()))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Post>> {
        Ok(self.read(|t| select_page(t.posts.values(), query)))
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        self.write(|t| {
            if !t.blogs.contains_key(&post.blog_id) {
                return Err(DomainError::BlogNotFound(post.blog_id));
            }
            t.posts.insert(post.id, post.clone());
            Ok(())
        })
    }

    async fn update(&self, post: &Post) -> RepoResult<bool> {
        self.write(|t| {
            if !t.blogs.contains_key(&post.blog_id) {
                return Err(DomainError::BlogNotFound(post.blog_id));
            }
            Ok(match t.posts.get_mut(&post.id) {
                Some(stored) => {
                    *stored = post.clone();
                    true
                }
                None => false,
            })
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.write(|t| t.remove_post(id)))
    }

    async fn rename_blog(&self, blog_id: Uuid, blog_name: &str) -> RepoResult<u64> {
        Ok(self.write(|t| {
            let mut renamed = 0;
            for post in t.posts.values_mut().filter(|p| p.blog_id == blog_id) {
                post.blog_name = blog_name.to_string();
                renamed += 1;
            }
            renamed
        }))
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comment>> {
        Ok(self.read(|t| t.comments.get(&id).cloned()))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Comment>> {
        Ok(self.read(|t| select_page(t.comments.values(), query)))
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.write(|t| {
            if !t.posts.contains_key(&comment.post_id) {
                return Err(DomainError::PostNotFound(comment.post_id));
            }
            t.comments.insert(comment.id, comment.clone());
            Ok(())
        })
    }

    async fn update_content(&self, id: Uuid, content: &str) -> RepoResult<bool> {
        Ok(self.write(|t| match t.comments.get_mut(&id) {
            Some(comment) => {
                comment.content = content.to_string();
                true
            }
            None => false,
        }))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.write(|t| t.remove_comment(id)))
    }
}

fn find_user(t: &Tables, predicate: impl Fn(&User) -> bool) -> Option<User> {
    t.users
        .values()
        .map(|stored| &stored.user)
        .find(|user| predicate(user))
        .cloned()
}

fn with_user(t: &mut Tables, id: Uuid, f: impl FnOnce(&mut StoredUser)) -> bool {
    match t.users.get_mut(&id) {
        Some(stored) => {
            f(stored);
            true
        }
        None => false,
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.read(|t| t.users.get(&id).map(|s| s.user.clone())))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<User>> {
        Ok(self.read(|t| {
            ids.iter()
                .filter_map(|id| t.users.get(id).map(|s| s.user.clone()))
                .collect()
        }))
    }

    async fn find_by_login_or_email(&self, value: &str) -> RepoResult<Option<User>> {
        Ok(self.read(|t| find_user(t, |u| u.login == value || u.email == value)))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.read(|t| find_user(t, |u| u.email == email)))
    }

    async fn find_by_confirmation_code(&self, code: &str) -> RepoResult<Option<User>> {
        Ok(self.read(|t| {
            find_user(t, |u| u.email_confirmation.code.as_deref() == Some(code))
        }))
    }

    async fn find_by_recovery_code(&self, code: &str) -> RepoResult<Option<User>> {
        Ok(self.read(|t| {
            find_user(t, |u| {
                u.password_recovery.as_ref().is_some_and(|r| r.code == code)
            })
        }))
    }

    async fn login_exists(&self, login: &str) -> RepoResult<bool> {
        Ok(self.read(|t| find_user(t, |u| u.login == login).is_some()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.read(|t| find_user(t, |u| u.email == email).is_some()))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<User>> {
        Ok(self.read(|t| {
            let users: Vec<User> = t.users.values().map(|s| s.user.clone()).collect();
            select_page(users.iter(), query)
        }))
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        self.write(|t| {
            // checked under the write lock, like the unique constraints
            if t.users.values().any(|s| s.user.login == user.login) {
                return Err(DomainError::LoginAlreadyExists);
            }
            if t.users.values().any(|s| s.user.email == user.email) {
                return Err(DomainError::EmailAlreadyExists);
            }
            t.users.insert(
                user.id,
                StoredUser {
                    user: user.clone(),
                    password_hash: password_hash.to_string(),
                },
            );
            Ok(())
        })
    }

    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        Ok(self.read(|t| t.users.get(&id).map(|s| s.password_hash.clone())))
    }

    async fn update_confirmation(
        &self,
        id: Uuid,
        confirmation: &EmailConfirmation,
    ) -> RepoResult<bool> {
        Ok(self.write(|t| {
            with_user(t, id, |s| s.user.email_confirmation = confirmation.clone())
        }))
    }

    async fn update_recovery(
        &self,
        id: Uuid,
        recovery: Option<&PasswordRecovery>,
    ) -> RepoResult<bool> {
        Ok(self.write(|t| with_user(t, id, |s| s.user.password_recovery = recovery.cloned())))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<bool> {
        Ok(self.write(|t| {
            with_user(t, id, |s| {
                s.password_hash = password_hash.to_string();
                s.user.password_recovery = None;
            })
        }))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.write(|t| {
            t.sessions.retain(|_, s| s.user_id != id);
            t.users.remove(&id).is_some()
        }))
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn find_set(&self, target: ReactionTarget) -> RepoResult<ReactionSet> {
        Ok(self.read(|t| t.reactions.get(&target).cloned().unwrap_or_default()))
    }

    async fn find_sets(
        &self,
        kind: ReactableKind,
        ids: &[Uuid],
    ) -> RepoResult<HashMap<Uuid, ReactionSet>> {
        Ok(self.read(|t| {
            ids.iter()
                .filter_map(|id| {
                    let target = ReactionTarget { kind, id: *id };
                    t.reactions.get(&target).map(|set| (*id, set.clone()))
                })
                .collect()
        }))
    }

    #[instrument(skip(self))]
    async fn apply(
        &self,
        target: ReactionTarget,
        user_id: Uuid,
        status: LikeStatus,
        at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        Ok(self.write(|t| {
            if !t.target_exists(target) {
                return false;
            }
            let set = t.reactions.entry(target).or_default();
            if set.set(user_id, status, at) == Transition::Unchanged {
                tracing::trace!("Reaction left unchanged");
            }
            true
        }))
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, session: &DeviceSession) -> RepoResult<()> {
        self.write(|t| {
            if !t.users.contains_key(&session.user_id) {
                return Err(DomainError::UserNotFound(session.user_id));
            }
            t.sessions.insert(session.device_id, session.clone());
            Ok(())
        })
    }

    async fn find_by_device(&self, device_id: Uuid) -> RepoResult<Option<DeviceSession>> {
        Ok(self.read(|t| t.sessions.get(&device_id).cloned()))
    }

    #[instrument(skip(self))]
    async fn rotate(
        &self,
        device_id: Uuid,
        expected_issued_at: DateTime<Utc>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        Ok(self.write(|t| match t.sessions.get_mut(&device_id) {
            Some(session) if session.issued_at == expected_issued_at => {
                session.issued_at = issued_at;
                session.expires_at = expires_at;
                session.last_active_at = issued_at;
                true
            }
            _ => false,
        }))
    }

    async fn list_by_user(&self, user_id: Uuid) -> RepoResult<Vec<DeviceSession>> {
        let mut sessions: Vec<DeviceSession> = self.read(|t| {
            t.sessions
                .values()
                .filter(|s| s.belongs_to(user_id))
                .cloned()
                .collect()
        });
        sessions.sort_by_key(|s| (s.issued_at, s.device_id));
        Ok(sessions)
    }

    async fn delete(&self, device_id: Uuid) -> RepoResult<bool> {
        Ok(self.write(|t| t.sessions.remove(&device_id).is_some()))
    }

    async fn delete_all_except(&self, user_id: Uuid, keep_device_id: Uuid) -> RepoResult<u64> {
        Ok(self.write(|t| {
            let before = t.sessions.len();
            t.sessions
                .retain(|id, s| !s.belongs_to(user_id) || *id == keep_device_id);
            (before - t.sessions.len()) as u64
        }))
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> RepoResult<u64> {
        Ok(self.write(|t| {
            let before = t.sessions.len();
            t.sessions.retain(|_, s| !s.belongs_to(user_id));
            (before - t.sessions.len()) as u64
        }))
    }
}

#[async_trait]
impl DataMaintenance for MemoryStore {
    async fn clear_all(&self) -> RepoResult<()> {
        self.write(|t| *t = Tables::default());
        tracing::warn!("All stored data was cleared");
        Ok(())
    }
}
