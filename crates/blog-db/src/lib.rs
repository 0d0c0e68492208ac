//! # blog-db
//!
//! Persistence layer implementing the repository traits from `blog-core`.
//!
//! ## Overview
//!
//! - PostgreSQL via SQLx: connection pool, embedded schema, `FromRow` models,
//!   entity mappers, and repositories that translate the `ListQuery` spec to SQL
//! - An in-memory store implementing every repository trait, for local runs and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blog_common::AppConfig;
//! use blog_db::pool::{apply_schema, create_pool, DatabaseConfig};
//! use blog_db::repositories::PgBlogRepository;
//!
//! async fn example(app_config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let database = app_config.storage.database.as_ref().ok_or("no database configured")?;
//!     let pool = create_pool(&DatabaseConfig::from(database)).await?;
//!     apply_schema(&pool).await?;
//!     let blogs = PgBlogRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod query;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{apply_schema, create_pool, DatabaseConfig, PgPool};
pub use repositories::{
    PgBlogRepository, PgCommentRepository, PgMaintenance, PgPostRepository,
    PgReactionRepository, PgSessionRepository, PgUserRepository,
};
