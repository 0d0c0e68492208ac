//! Comment service
//!
//! Any authenticated user may comment on a post; only the author may edit
//! or delete the comment.

use tracing::{info, instrument};
use uuid::Uuid;

use blog_core::entities::{Comment, CommentatorInfo};
use blog_core::error::DomainError;
use blog_core::query::Filter;

use crate::dto::{CommentInput, CommentView, ListParams, PageView};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::PostService;
use super::reaction::ReactionService;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn find(&self, id: Uuid) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", id))
    }

    /// Load a comment the caller authored
    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> ServiceResult<Comment> {
        let comment = self.find(id).await?;
        if !comment.is_authored_by(user_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }
        Ok(comment)
    }

    /// Fails with NotFound or Forbidden before the body of an edit is looked at
    pub async fn ensure_author(&self, id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        self.find_owned(id, user_id).await.map(|_| ())
    }

    /// Comments under a post; the post must exist
    #[instrument(skip(self))]
    pub async fn list_for_post(
        &self,
        post_id: Uuid,
        params: &ListParams,
        viewer: Option<Uuid>,
    ) -> ServiceResult<PageView<CommentView>> {
        PostService::new(self.ctx).find(post_id).await?;

        let query = params
            .to_list_query(Comment::SORTABLE_FIELDS)
            .and_filter(Filter::eq("postId", post_id));
        let page = self.ctx.comment_repo().list(&query).await?;
        let items = ReactionService::new(self.ctx)
            .project_comments(page.items.clone(), viewer)
            .await?;
        Ok(PageView::from_page(&page, items))
    }

    pub async fn get(&self, id: Uuid, viewer: Option<Uuid>) -> ServiceResult<CommentView> {
        let comment = self.find(id).await?;
        ReactionService::new(self.ctx)
            .project_comment(comment, viewer)
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        input: CommentInput,
    ) -> ServiceResult<CommentView> {
        PostService::new(self.ctx).find(post_id).await?;
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::unauthorized("User no longer exists"))?;

        let comment = Comment::new(
            post_id,
            input.content,
            CommentatorInfo {
                user_id: user.id,
                user_login: user.login,
            },
        );
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, "Comment created");
        ReactionService::new(self.ctx)
            .project_comment(comment, Some(user_id))
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, user_id: Uuid, input: CommentInput) -> ServiceResult<()> {
        self.find_owned(id, user_id).await?;
        if !self
            .ctx
            .comment_repo()
            .update_content(id, &input.content)
            .await?
        {
            return Err(ServiceError::not_found("Comment", id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        self.find_owned(id, user_id).await?;
        if !self.ctx.comment_repo().delete(id).await? {
            return Err(ServiceError::not_found("Comment", id));
        }
        info!(comment_id = %id, "Comment deleted");
        Ok(())
    }
}
