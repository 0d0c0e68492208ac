//! Blog handlers
//!
//! Reads are public; writes need the admin's Basic credentials.

use axum::{extract::State, Json};
use blog_service::dto::{BlogInput, BlogPostInput, BlogView, PageView, PostView};
use blog_service::services::{BlogService, PostService};

use crate::extractors::{AdminAuth, IdPath, Listing, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /blogs
pub async fn list_blogs(
    State(state): State<AppState>,
    Listing(params): Listing,
) -> ApiResult<Json<PageView<BlogView>>> {
    let page = BlogService::new(state.service_context()).list(&params).await?;
    Ok(Json(page))
}

/// GET /blogs/:id
pub async fn get_blog(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<BlogView>> {
    let blog = BlogService::new(state.service_context()).get(id).await?;
    Ok(Json(blog))
}

/// POST /blogs
pub async fn create_blog(
    State(state): State<AppState>,
    _admin: AdminAuth,
    ValidatedJson(input): ValidatedJson<BlogInput>,
) -> ApiResult<Created<Json<BlogView>>> {
    let blog = BlogService::new(state.service_context()).create(input).await?;
    Ok(Created(Json(blog)))
}

/// PUT /blogs/:id
pub async fn update_blog(
    State(state): State<AppState>,
    _admin: AdminAuth,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<BlogInput>,
) -> ApiResult<NoContent> {
    BlogService::new(state.service_context())
        .update(id, input)
        .await?;
    Ok(NoContent)
}

/// DELETE /blogs/:id
pub async fn delete_blog(
    State(state): State<AppState>,
    _admin: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    BlogService::new(state.service_context()).delete(id).await?;
    Ok(NoContent)
}

/// GET /blogs/:id/posts
pub async fn list_blog_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(id): IdPath,
    Listing(params): Listing,
) -> ApiResult<Json<PageView<PostView>>> {
    let page = PostService::new(state.service_context())
        .list_for_blog(id, &params, viewer.user_id())
        .await?;
    Ok(Json(page))
}

/// POST /blogs/:id/posts
pub async fn create_blog_post(
    State(state): State<AppState>,
    _admin: AdminAuth,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<BlogPostInput>,
) -> ApiResult<Created<Json<PostView>>> {
    let post = PostService::new(state.service_context())
        .create_for_blog(id, input)
        .await?;
    Ok(Created(Json(post)))
}
