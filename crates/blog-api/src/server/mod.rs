//! Server setup and initialization
//!
//! The composition root: picks a storage backend, wires repositories and
//! the mailer into a `ServiceContext`, and runs the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use blog_common::{AppConfig, AppError, JwtService, StorageBackend};
use blog_db::{
    apply_schema, create_pool, MemoryStore, PgBlogRepository, PgCommentRepository,
    PgMaintenance, PgPostRepository, PgReactionRepository, PgSessionRepository,
    PgUserRepository,
};
use blog_service::{LogMailer, Mailer, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let router = create_router(state.config())?;
    let router = apply_middleware(router, state.config());
    Ok(router.with_state(state))
}

/// Initialize all dependencies with mail written to the log
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    create_app_state_with(config, Arc::new(LogMailer)).await
}

/// Initialize all dependencies with the given mailer
pub async fn create_app_state_with(
    config: AppConfig,
    mailer: Arc<dyn Mailer>,
) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let builder = ServiceContextBuilder::new()
        .jwt_service(jwt_service)
        .mailer(mailer)
        .auth_config(config.auth.clone())
        .admin_config(config.admin.clone());

    let builder = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            builder.store(MemoryStore::new())
        }
        StorageBackend::Postgres => {
            let database = config.storage.database.as_ref().ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for the postgres backend".to_string())
            })?;

            info!("Connecting to PostgreSQL...");
            let db_config = blog_db::DatabaseConfig::from(database);
            let pool = create_pool(&db_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            apply_schema(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            builder
                .blog_repo(Arc::new(PgBlogRepository::new(pool.clone())))
                .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
                .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
                .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
                .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
                .session_repo(Arc::new(PgSessionRepository::new(pool.clone())))
                .maintenance(Arc::new(PgMaintenance::new(pool)))
        }
    };

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on `listener` until Ctrl-C
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;
    info!("Server listening on http://{}", addr);

    serve(listener, app).await
}
