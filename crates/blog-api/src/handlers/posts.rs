//! Post handlers, including a post's comments and its like status

use axum::{extract::State, Json};
use blog_core::entities::ReactionTarget;
use blog_service::dto::{CommentInput, CommentView, LikeStatusInput, PageView, PostInput, PostView};
use blog_service::services::{CommentService, PostService, ReactionService};

use crate::extractors::{AdminAuth, AuthUser, IdPath, Listing, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Listing(params): Listing,
) -> ApiResult<Json<PageView<PostView>>> {
    let page = PostService::new(state.service_context())
        .list(&params, viewer.user_id())
        .await?;
    Ok(Json(page))
}

/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<PostView>> {
    let post = PostService::new(state.service_context())
        .get(id, viewer.user_id())
        .await?;
    Ok(Json(post))
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    _admin: AdminAuth,
    ValidatedJson(input): ValidatedJson<PostInput>,
) -> ApiResult<Created<Json<PostView>>> {
    let post = PostService::new(state.service_context()).create(input).await?;
    Ok(Created(Json(post)))
}

/// PUT /posts/:id
pub async fn update_post(
    State(state): State<AppState>,
    _admin: AdminAuth,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<PostInput>,
) -> ApiResult<NoContent> {
    PostService::new(state.service_context())
        .update(id, input)
        .await?;
    Ok(NoContent)
}

/// DELETE /posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    _admin: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    PostService::new(state.service_context()).delete(id).await?;
    Ok(NoContent)
}

/// PUT /posts/:id/like-status
pub async fn set_post_like_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<LikeStatusInput>,
) -> ApiResult<NoContent> {
    ReactionService::new(state.service_context())
        .set_reaction(auth.user_id, ReactionTarget::post(id), input.status())
        .await?;
    Ok(NoContent)
}

/// GET /posts/:id/comments
pub async fn list_post_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(id): IdPath,
    Listing(params): Listing,
) -> ApiResult<Json<PageView<CommentView>>> {
    let page = CommentService::new(state.service_context())
        .list_for_post(id, &params, viewer.user_id())
        .await?;
    Ok(Json(page))
}

/// POST /posts/:id/comments
pub async fn create_post_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CommentInput>,
) -> ApiResult<Created<Json<CommentView>>> {
    let comment = CommentService::new(state.service_context())
        .create(id, auth.user_id, input)
        .await?;
    Ok(Created(Json(comment)))
}
