//! Post service
//!
//! Posts belong to a blog and carry its name. Every read is projected
//! through the reaction service for the requesting viewer.

use tracing::{info, instrument};
use uuid::Uuid;

use blog_core::entities::{Blog, Post};
use blog_core::query::Filter;

use crate::dto::{BlogPostInput, ListParams, PageView, PostInput, PostView};

use super::blog::BlogService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::reaction::ReactionService;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a post or fail with NotFound
    pub async fn find(&self, id: Uuid) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", id))
    }

    /// Resolve the `blogId` of a request body; failures are field errors
    async fn blog_from_input(&self, blog_id: &str) -> ServiceResult<Blog> {
        let unknown = || ServiceError::invalid_field("blogId", "Blog does not exist");
        let id: Uuid = blog_id.parse().map_err(|_| unknown())?;
        self.ctx.blog_repo().find_by_id(id).await?.ok_or_else(unknown)
    }

    async fn page(
        &self,
        params: &ListParams,
        filter: Option<Filter>,
        viewer: Option<Uuid>,
    ) -> ServiceResult<PageView<PostView>> {
        let mut query = params.to_list_query(Post::SORTABLE_FIELDS);
        if let Some(filter) = filter {
            query = query.and_filter(filter);
        }

        let page = self.ctx.post_repo().list(&query).await?;
        let items = ReactionService::new(self.ctx)
            .project_posts(page.items.clone(), viewer)
            .await?;
        Ok(PageView::from_page(&page, items))
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        params: &ListParams,
        viewer: Option<Uuid>,
    ) -> ServiceResult<PageView<PostView>> {
        self.page(params, None, viewer).await
    }

    /// Posts of one blog; the blog must exist
    #[instrument(skip(self))]
    pub async fn list_for_blog(
        &self,
        blog_id: Uuid,
        params: &ListParams,
        viewer: Option<Uuid>,
    ) -> ServiceResult<PageView<PostView>> {
        BlogService::new(self.ctx).find(blog_id).await?;
        self.page(params, Some(Filter::eq("blogId", blog_id)), viewer)
            .await
    }

    pub async fn get(&self, id: Uuid, viewer: Option<Uuid>) -> ServiceResult<PostView> {
        let post = self.find(id).await?;
        ReactionService::new(self.ctx).project_post(post, viewer).await
    }

    async fn insert(&self, input: BlogPostInput, blog: &Blog) -> ServiceResult<PostView> {
        let post = Post::new(input.title, input.short_description, input.content, blog);
        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, blog_id = %blog.id, "Post created");
        ReactionService::new(self.ctx).project_post(post, None).await
    }

    #[instrument(skip(self, input), fields(blog_id = %input.blog_id))]
    pub async fn create(&self, input: PostInput) -> ServiceResult<PostView> {
        let (input, blog_id) = input.into_parts();
        let blog = self.blog_from_input(&blog_id).await?;
        self.insert(input, &blog).await
    }

    /// Create under a blog addressed by path; a missing blog is NotFound
    #[instrument(skip(self, input))]
    pub async fn create_for_blog(
        &self,
        blog_id: Uuid,
        input: BlogPostInput,
    ) -> ServiceResult<PostView> {
        let blog = BlogService::new(self.ctx).find(blog_id).await?;
        self.insert(input, &blog).await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: PostInput) -> ServiceResult<()> {
        let (input, blog_id) = input.into_parts();
        let blog = self.blog_from_input(&blog_id).await?;
        let mut post = self.find(id).await?;
        post.update(input.title, input.short_description, input.content, &blog);

        if !self.ctx.post_repo().update(&post).await? {
            return Err(ServiceError::not_found("Post", id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.post_repo().delete(id).await? {
            return Err(ServiceError::not_found("Post", id));
        }
        info!(post_id = %id, "Post deleted");
        Ok(())
    }
}
