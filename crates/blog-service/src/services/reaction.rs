//! Reaction service
//!
//! Moves a user's like status between buckets and projects stored
//! reaction sets into the `likesInfo` shapes clients see.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::{debug, instrument};
use uuid::Uuid;

use blog_core::entities::{
    Comment, LikeStatus, Post, ReactableKind, ReactionSet, ReactionTarget, Transition,
};

use crate::dto::{
    CommentView, CommentatorInfoView, ExtendedLikesInfoView, LikeDetailsView, LikesInfoView,
    PostView,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Number of likes listed in `newestLikes`
pub const NEWEST_LIKES_LIMIT: usize = 3;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn ensure_target(&self, target: ReactionTarget) -> ServiceResult<()> {
        let exists = match target.kind {
            ReactableKind::Post => self.ctx.post_repo().find_by_id(target.id).await?.is_some(),
            ReactableKind::Comment => {
                self.ctx.comment_repo().find_by_id(target.id).await?.is_some()
            }
        };
        if exists {
            Ok(())
        } else {
            Err(not_found(target))
        }
    }

    /// Put `user_id` in the bucket for `status` on `target`.
    ///
    /// Withdrawing a reaction that was never placed succeeds without writing.
    #[instrument(skip(self))]
    pub async fn set_reaction(
        &self,
        user_id: Uuid,
        target: ReactionTarget,
        status: LikeStatus,
    ) -> ServiceResult<()> {
        self.ensure_target(target).await?;

        let now = Utc::now();
        let mut set = self.ctx.reaction_repo().find_set(target).await?;
        let transition = set.set(user_id, status, now);
        if transition == Transition::Unchanged {
            debug!("No reaction to withdraw");
            return Ok(());
        }

        if !self
            .ctx
            .reaction_repo()
            .apply(target, user_id, status, now)
            .await?
        {
            return Err(not_found(target));
        }

        debug!(?transition, "Reaction stored");
        Ok(())
    }

    /// Views for `posts`, in the same order, with newest likes resolved to logins
    #[instrument(skip(self, posts), fields(count = posts.len()))]
    pub async fn project_posts(
        &self,
        posts: Vec<Post>,
        viewer: Option<Uuid>,
    ) -> ServiceResult<Vec<PostView>> {
        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let mut sets = self
            .ctx
            .reaction_repo()
            .find_sets(ReactableKind::Post, &ids)
            .await?;

        let newest: HashMap<Uuid, Vec<_>> = sets
            .iter()
            .map(|(id, set)| (*id, set.newest_likes(NEWEST_LIKES_LIMIT)))
            .collect();
        let liker_ids: Vec<Uuid> = newest
            .values()
            .flatten()
            .map(|r| r.user_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let logins: HashMap<Uuid, String> = self
            .ctx
            .user_repo()
            .find_by_ids(&liker_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.login))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let set = sets.remove(&post.id).unwrap_or_default();
                let info = set.project(viewer);
                let newest_likes = newest
                    .get(&post.id)
                    .into_iter()
                    .flatten()
                    .map(|r| LikeDetailsView {
                        added_at: r.created_at,
                        user_id: r.user_id,
                        // a deleted user keeps an empty login
                        login: logins.get(&r.user_id).cloned().unwrap_or_default(),
                    })
                    .collect();

                PostView {
                    id: post.id,
                    title: post.title,
                    short_description: post.short_description,
                    content: post.content,
                    blog_id: post.blog_id,
                    blog_name: post.blog_name,
                    created_at: post.created_at,
                    extended_likes_info: ExtendedLikesInfoView {
                        likes_count: info.likes_count,
                        dislikes_count: info.dislikes_count,
                        my_status: info.my_status,
                        newest_likes,
                    },
                }
            })
            .collect())
    }

    pub async fn project_post(&self, post: Post, viewer: Option<Uuid>) -> ServiceResult<PostView> {
        let id = post.id;
        self.project_posts(vec![post], viewer)
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found("Post", id))
    }

    /// Views for `comments`, in the same order
    #[instrument(skip(self, comments), fields(count = comments.len()))]
    pub async fn project_comments(
        &self,
        comments: Vec<Comment>,
        viewer: Option<Uuid>,
    ) -> ServiceResult<Vec<CommentView>> {
        let ids: Vec<Uuid> = comments.iter().map(|c| c.id).collect();
        let mut sets = self
            .ctx
            .reaction_repo()
            .find_sets(ReactableKind::Comment, &ids)
            .await?;

        Ok(comments
            .into_iter()
            .map(|comment| {
                let set: ReactionSet = sets.remove(&comment.id).unwrap_or_default();
                CommentView {
                    id: comment.id,
                    commentator_info: CommentatorInfoView::from(&comment),
                    content: comment.content,
                    created_at: comment.created_at,
                    likes_info: LikesInfoView::from(set.project(viewer)),
                }
            })
            .collect())
    }

    pub async fn project_comment(
        &self,
        comment: Comment,
        viewer: Option<Uuid>,
    ) -> ServiceResult<CommentView> {
        let id = comment.id;
        self.project_comments(vec![comment], viewer)
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found("Comment", id))
    }
}

fn not_found(target: ReactionTarget) -> ServiceError {
    match target.kind {
        ReactableKind::Post => ServiceError::not_found("Post", target.id),
        ReactableKind::Comment => ServiceError::not_found("Comment", target.id),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blog_core::entities::CommentatorInfo;
    use tokio::task::JoinSet;

    use super::super::test_support::{confirmed_user, harness, stored_blog, Harness};
    use super::*;

    async fn stored_post(h: &Harness) -> Post {
        let blog = stored_blog(&h.ctx).await;
        let post = Post::new("title".into(), "short".into(), "content".into(), &blog);
        h.ctx.post_repo().create(&post).await.unwrap();
        post
    }

    #[tokio::test]
    async fn test_no_reactions_projects_zero_counts() {
        let h = harness();
        let post = stored_post(&h).await;

        let view = ReactionService::new(&h.ctx)
            .project_post(post, Some(Uuid::new_v4()))
            .await
            .unwrap();
        let info = view.extended_likes_info;
        assert_eq!((info.likes_count, info.dislikes_count), (0, 0));
        assert_eq!(info.my_status, LikeStatus::None);
        assert!(info.newest_likes.is_empty());
    }

    #[tokio::test]
    async fn test_like_then_dislike_then_none() {
        let h = harness();
        let post = stored_post(&h).await;
        let user = confirmed_user(&h.ctx, "neo").await;
        let target = ReactionTarget::post(post.id);
        let reactions = ReactionService::new(&h.ctx);

        reactions.set_reaction(user.id, target, LikeStatus::Like).await.unwrap();
        reactions.set_reaction(user.id, target, LikeStatus::Dislike).await.unwrap();
        let view = reactions.project_post(post.clone(), Some(user.id)).await.unwrap();
        assert_eq!(view.extended_likes_info.my_status, LikeStatus::Dislike);
        assert_eq!(view.extended_likes_info.likes_count, 0);
        assert_eq!(view.extended_likes_info.dislikes_count, 1);

        reactions.set_reaction(user.id, target, LikeStatus::None).await.unwrap();
        let set = h.ctx.reaction_repo().find_set(target).await.unwrap();
        assert_eq!(set.status_of(user.id), Some(LikeStatus::None));
        let view = reactions.project_post(post, Some(user.id)).await.unwrap();
        assert_eq!(view.extended_likes_info.my_status, LikeStatus::None);
        assert_eq!(view.extended_likes_info.dislikes_count, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reactions_from_distinct_users() {
        let h = harness();
        let post = stored_post(&h).await;
        let target = ReactionTarget::post(post.id);
        let ctx = Arc::new(h.ctx);

        let mut tasks = JoinSet::new();
        for i in 0..40 {
            let ctx = Arc::clone(&ctx);
            tasks.spawn(async move {
                let user_id = Uuid::new_v4();
                let reactions = ReactionService::new(&ctx);
                reactions.set_reaction(user_id, target, LikeStatus::Like).await?;
                if i % 4 == 0 {
                    reactions.set_reaction(user_id, target, LikeStatus::Dislike).await?;
                }
                Ok::<_, ServiceError>(())
            });
        }
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap().unwrap();
        }

        let set = ctx.reaction_repo().find_set(target).await.unwrap();
        assert_eq!(set.likes_count(), 30);
        assert_eq!(set.dislikes_count(), 10);
        assert_eq!(set.entries().count(), 40);

        let view = ReactionService::new(&ctx).project_post(post, None).await.unwrap();
        let info = view.extended_likes_info;
        assert_eq!((info.likes_count, info.dislikes_count), (30, 10));
    }

    #[tokio::test]
    async fn test_liking_twice_is_idempotent() {
        let h = harness();
        let post = stored_post(&h).await;
        let user = confirmed_user(&h.ctx, "neo").await;
        let target = ReactionTarget::post(post.id);
        let reactions = ReactionService::new(&h.ctx);

        reactions.set_reaction(user.id, target, LikeStatus::Like).await.unwrap();
        reactions.set_reaction(user.id, target, LikeStatus::Like).await.unwrap();

        let set = h.ctx.reaction_repo().find_set(target).await.unwrap();
        assert_eq!(set.likes_count(), 1);
        assert_eq!(set.entries().count(), 1);
    }

    #[tokio::test]
    async fn test_withdrawing_without_reaction_writes_nothing() {
        let h = harness();
        let post = stored_post(&h).await;
        let target = ReactionTarget::post(post.id);

        ReactionService::new(&h.ctx)
            .set_reaction(Uuid::new_v4(), target, LikeStatus::None)
            .await
            .unwrap();
        assert!(h.ctx.reaction_repo().find_set(target).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reaction_on_missing_comment_is_not_found() {
        let h = harness();
        let err = ReactionService::new(&h.ctx)
            .set_reaction(Uuid::new_v4(), ReactionTarget::comment(Uuid::new_v4()), LikeStatus::Like)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_newest_likes_are_limited_and_carry_logins() {
        let h = harness();
        let post = stored_post(&h).await;
        let target = ReactionTarget::post(post.id);
        let reactions = ReactionService::new(&h.ctx);

        let mut users = Vec::new();
        for login in ["u1", "u2", "u3", "u4"] {
            let user = confirmed_user(&h.ctx, login).await;
            reactions.set_reaction(user.id, target, LikeStatus::Like).await.unwrap();
            users.push(user);
        }

        let view = reactions.project_post(post, None).await.unwrap();
        let info = view.extended_likes_info;
        assert_eq!(info.likes_count, 4);
        assert_eq!(info.my_status, LikeStatus::None);
        assert_eq!(info.newest_likes.len(), NEWEST_LIKES_LIMIT);
        for like in &info.newest_likes {
            let user = users.iter().find(|u| u.id == like.user_id).unwrap();
            assert_eq!(like.login, user.login);
        }
        assert!(info
            .newest_likes
            .windows(2)
            .all(|w| w[0].added_at >= w[1].added_at));
    }

    #[tokio::test]
    async fn test_comment_projection_counts_distinct_users() {
        let h = harness();
        let post = stored_post(&h).await;
        let author = confirmed_user(&h.ctx, "author").await;
        let comment = Comment::new(
            post.id,
            "a comment that is long enough".into(),
            CommentatorInfo {
                user_id: author.id,
                user_login: author.login.clone(),
            },
        );
        h.ctx.comment_repo().create(&comment).await.unwrap();
        let target = ReactionTarget::comment(comment.id);
        let reactions = ReactionService::new(&h.ctx);

        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        reactions.set_reaction(a, target, LikeStatus::Like).await.unwrap();
        reactions.set_reaction(b, target, LikeStatus::Like).await.unwrap();
        reactions.set_reaction(c, target, LikeStatus::Dislike).await.unwrap();

        let view = reactions.project_comment(comment, Some(b)).await.unwrap();
        assert_eq!(view.likes_info.likes_count, 2);
        assert_eq!(view.likes_info.dislikes_count, 1);
        assert_eq!(view.likes_info.my_status, LikeStatus::Like);
        assert_eq!(view.commentator_info.user_login, "author");
    }
}
