//! Authentication handlers
//!
//! Registration, confirmation, login, token refresh, logout, and password
//! recovery. The refresh token travels only in an HttpOnly cookie.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use blog_service::dto::{
    AccessTokenView, ConfirmationInput, EmailInput, LoginInput, MeView, NewPasswordInput,
    SessionTokens, UserInput,
};
use blog_service::services::AuthService;

use crate::extractors::{AuthUser, Client, RefreshToken, ValidatedJson, REFRESH_COOKIE};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

fn refresh_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .http_only(true)
        .secure(state.secure_cookies())
        .same_site(SameSite::Strict)
        .path("/")
        .build()
}

fn with_tokens(
    state: &AppState,
    jar: CookieJar,
    tokens: SessionTokens,
) -> (CookieJar, Json<AccessTokenView>) {
    let body = tokens.body();
    (jar.add(refresh_cookie(state, tokens.refresh_token)), Json(body))
}

/// POST /auth/registration
pub async fn registration(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UserInput>,
) -> ApiResult<NoContent> {
    AuthService::new(state.service_context()).register(input).await?;
    Ok(NoContent)
}

/// POST /auth/registration-confirmation
pub async fn registration_confirmation(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ConfirmationInput>,
) -> ApiResult<NoContent> {
    AuthService::new(state.service_context()).confirm(input).await?;
    Ok(NoContent)
}

/// POST /auth/registration-email-resending
pub async fn registration_email_resending(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<EmailInput>,
) -> ApiResult<NoContent> {
    AuthService::new(state.service_context())
        .resend_confirmation(input)
        .await?;
    Ok(NoContent)
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Client(client): Client,
    ValidatedJson(input): ValidatedJson<LoginInput>,
) -> ApiResult<(CookieJar, Json<AccessTokenView>)> {
    let tokens = AuthService::new(state.service_context())
        .login(input, client)
        .await?;
    Ok(with_tokens(&state, jar, tokens))
}

/// POST /auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    RefreshToken(token): RefreshToken,
) -> ApiResult<(CookieJar, Json<AccessTokenView>)> {
    let tokens = AuthService::new(state.service_context())
        .refresh(&token)
        .await?;
    Ok(with_tokens(&state, jar, tokens))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    RefreshToken(token): RefreshToken,
) -> ApiResult<(CookieJar, NoContent)> {
    AuthService::new(state.service_context())
        .logout(&token)
        .await?;
    Ok((jar.remove(Cookie::build(REFRESH_COOKIE).path("/")), NoContent))
}

/// GET /auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<MeView>> {
    let me = AuthService::new(state.service_context())
        .me(auth.user_id)
        .await?;
    Ok(Json(me))
}

/// POST /auth/password-recovery
pub async fn password_recovery(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<EmailInput>,
) -> ApiResult<NoContent> {
    AuthService::new(state.service_context())
        .password_recovery(input)
        .await?;
    Ok(NoContent)
}

/// POST /auth/new-password
pub async fn new_password(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewPasswordInput>,
) -> ApiResult<NoContent> {
    AuthService::new(state.service_context())
        .new_password(input)
        .await?;
    Ok(NoContent)
}
