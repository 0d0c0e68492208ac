//! Comment handlers

use axum::{extract::State, Json};
use blog_core::entities::ReactionTarget;
use blog_service::dto::{CommentInput, CommentView, LikeStatusInput};
use blog_service::services::{CommentService, ReactionService};

use validator::Validate;

use crate::extractors::{AuthUser, IdPath, JsonBody, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /comments/:id
pub async fn get_comment(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<CommentView>> {
    let comment = CommentService::new(state.service_context())
        .get(id, viewer.user_id())
        .await?;
    Ok(Json(comment))
}

/// PUT /comments/:id
///
/// Existence and authorship are checked before the content rules.
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<CommentInput>,
) -> ApiResult<NoContent> {
    let comments = CommentService::new(state.service_context());
    comments.ensure_author(id, auth.user_id).await?;
    input.validate()?;
    comments.update(id, auth.user_id, input).await?;
    Ok(NoContent)
}

/// DELETE /comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    CommentService::new(state.service_context())
        .delete(id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// PUT /comments/:id/like-status
pub async fn set_comment_like_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<LikeStatusInput>,
) -> ApiResult<NoContent> {
    ReactionService::new(state.service_context())
        .set_reaction(auth.user_id, ReactionTarget::comment(id), input.status())
        .await?;
    Ok(NoContent)
}
