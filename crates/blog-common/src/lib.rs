//! # blog-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{AccessClaims, JwtService, PasswordService, RefreshClaims, TokenKind, TokenPair};
pub use config::{
    AdminConfig, AppConfig, AppSettings, AuthConfig, ConfigError, CorsConfig, DatabaseConfig,
    Environment, JwtConfig, RateLimitConfig, ServerConfig, StorageBackend, StorageConfig,
};
pub use error::{domain_status, AppError};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config, LogFormat, TracingConfig, TracingError,
};
