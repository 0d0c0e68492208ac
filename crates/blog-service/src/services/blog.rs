//! Blog service
//!
//! Admin-managed blogs. Renaming a blog refreshes the name copied onto its posts.

use tracing::{info, instrument};
use uuid::Uuid;

use blog_core::entities::Blog;

use crate::dto::{BlogInput, BlogView, ListParams, PageView};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Blog service
pub struct BlogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BlogService<'a> {
    /// Create a new BlogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a blog or fail with NotFound
    pub async fn find(&self, id: Uuid) -> ServiceResult<Blog> {
        self.ctx
            .blog_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Blog", id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self, params: &ListParams) -> ServiceResult<PageView<BlogView>> {
        let mut query = params.to_list_query(Blog::SORTABLE_FIELDS);
        if let Some(filter) = params.name_filter() {
            query = query.and_filter(filter);
        }

        let page = self.ctx.blog_repo().list(&query).await?;
        let items = page.items.iter().map(BlogView::from).collect();
        Ok(PageView::from_page(&page, items))
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<BlogView> {
        Ok(BlogView::from(self.find(id).await?))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: BlogInput) -> ServiceResult<BlogView> {
        let blog = Blog::new(input.name, input.description, input.website_url);
        self.ctx.blog_repo().create(&blog).await?;

        info!(blog_id = %blog.id, "Blog created");
        Ok(BlogView::from(blog))
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: BlogInput) -> ServiceResult<()> {
        let mut blog = self.find(id).await?;
        let renamed = blog.name != input.name;
        blog.update(input.name, input.description, input.website_url);

        if !self.ctx.blog_repo().update(&blog).await? {
            return Err(ServiceError::not_found("Blog", id));
        }
        if renamed {
            let posts = self.ctx.post_repo().rename_blog(id, &blog.name).await?;
            info!(posts, "Blog name copied to posts");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.blog_repo().delete(id).await? {
            return Err(ServiceError::not_found("Blog", id));
        }
        info!(blog_id = %id, "Blog deleted");
        Ok(())
    }
}
