//! Authentication extractors
//!
//! Bearer access tokens for users, Basic credentials for the admin, and
//! the refresh-token cookie for session endpoints.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::CookieJar,
    headers::{
        authorization::{Basic, Bearer},
        Authorization,
    },
    TypedHeader,
};
use blog_common::AdminConfig;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Authenticated user extracted from a Bearer access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl AuthUser {
    /// Validate a raw access token
    fn from_token(state: &AppState, token: &str) -> Result<Self, ApiError> {
        let claims = state.jwt_service().validate_access_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Invalid access token");
            ApiError::InvalidAuth
        })?;
        Ok(Self {
            user_id: claims.user_id(),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        Self::from_token(&AppState::from_ref(state), bearer.token())
    }
}

/// Viewer of a public read.
///
/// Anonymous when the header is absent or the token does not validate, so a
/// stale token never turns a public page into a 401.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(Authorization(bearer))) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
        else {
            return Ok(Self(None));
        };

        Ok(Self(
            AuthUser::from_token(&AppState::from_ref(state), bearer.token()).ok(),
        ))
    }
}

/// Both halves are compared in constant time and both are always compared
fn credentials_match(login: &str, password: &str, admin: &AdminConfig) -> bool {
    let login_ok = login.as_bytes().ct_eq(admin.login.as_bytes());
    let password_ok = password.as_bytes().ct_eq(admin.password.as_bytes());
    (login_ok & password_ok).into()
}

/// Basic-auth admin guard
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let admin = app_state.admin();
        if credentials_match(basic.username(), basic.password(), admin) {
            Ok(Self)
        } else {
            tracing::warn!(login = basic.username(), "Rejected admin credentials");
            Err(ApiError::InvalidAuth)
        }
    }
}

/// Raw refresh token from the cookie; validated by the security service
#[derive(Debug, Clone)]
pub struct RefreshToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RefreshToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::MissingAuth)?;

        jar.get(REFRESH_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .map(Self)
            .ok_or(ApiError::MissingAuth)
    }
}
