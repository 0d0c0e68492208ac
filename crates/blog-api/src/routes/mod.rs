//! Route definitions
//!
//! Routes are grouped by resource. Rate limiting applies to `/auth` only;
//! `/testing` is mounted only when enabled in configuration.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use blog_common::{AppConfig, AppError, RateLimitConfig};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};

use crate::handlers::{auth, blogs, comments, health, posts, security, testing, users};
use crate::state::AppState;

/// Create the main router with every route the configuration enables
pub fn create_router(config: &AppConfig) -> Result<Router<AppState>, AppError> {
    let mut router = Router::new()
        .merge(auth_routes(&config.rate_limit)?)
        .merge(user_routes())
        .merge(blog_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(security_routes())
        .merge(health_routes());

    if config.testing_routes_enabled {
        tracing::warn!("Testing routes enabled: DELETE /testing/all-data wipes every table");
        router = router.route("/testing/all-data", delete(testing::clear_all_data));
    }

    Ok(router)
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
}

/// Authentication routes, throttled per client IP when enabled
fn auth_routes(rate_limit: &RateLimitConfig) -> Result<Router<AppState>, AppError> {
    let router = Router::new()
        .route("/auth/registration", post(auth::registration))
        .route(
            "/auth/registration-confirmation",
            post(auth::registration_confirmation),
        )
        .route(
            "/auth/registration-email-resending",
            post(auth::registration_email_resending),
        )
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh-token", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/password-recovery", post(auth::password_recovery))
        .route("/auth/new-password", post(auth::new_password));

    if !rate_limit.enabled {
        return Ok(router);
    }

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(rate_limit.replenish_interval_secs)
        .burst_size(rate_limit.burst)
        .key_extractor(SmartIpKeyExtractor)
        .finish()
        .ok_or_else(|| AppError::Config("invalid rate limit configuration".to_string()))?;

    Ok(router.layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

/// Admin user management
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id", delete(users::delete_user))
}

fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(blogs::list_blogs).post(blogs::create_blog))
        .route(
            "/blogs/:id",
            get(blogs::get_blog)
                .put(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
        .route(
            "/blogs/:id/posts",
            get(blogs::list_blog_posts).post(blogs::create_blog_post),
        )
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/:id/like-status", put(posts::set_post_like_status))
        .route(
            "/posts/:id/comments",
            get(posts::list_post_comments).post(posts::create_post_comment),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments/:id",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route(
            "/comments/:id/like-status",
            put(comments::set_comment_like_status),
        )
}

/// Device sessions, authenticated by the refresh-token cookie
fn security_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/security/devices",
            get(security::list_devices).delete(security::terminate_other_devices),
        )
        .route("/security/devices/:id", delete(security::terminate_device))
}
