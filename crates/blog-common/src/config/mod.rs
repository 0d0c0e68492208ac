//! Configuration structs

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, AuthConfig, ConfigError, CorsConfig, DatabaseConfig,
    Environment, JwtConfig, RateLimitConfig, ServerConfig, StorageBackend, StorageConfig,
};
