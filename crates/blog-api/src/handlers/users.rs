//! Admin user management handlers

use axum::{extract::State, Json};
use blog_service::dto::{PageView, UserInput, UserView};
use blog_service::services::UserService;

use crate::extractors::{AdminAuth, IdPath, Listing, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Listing(params): Listing,
) -> ApiResult<Json<PageView<UserView>>> {
    let page = UserService::new(state.service_context()).list(&params).await?;
    Ok(Json(page))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminAuth,
    ValidatedJson(input): ValidatedJson<UserInput>,
) -> ApiResult<Created<Json<UserView>>> {
    let user = UserService::new(state.service_context()).create(input).await?;
    Ok(Created(Json(user)))
}

/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    UserService::new(state.service_context()).delete(id).await?;
    Ok(NoContent)
}
