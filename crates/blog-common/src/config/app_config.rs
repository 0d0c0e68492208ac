//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
    pub admin: AdminConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    /// Mount `DELETE /testing/all-data`
    pub testing_routes_enabled: bool,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment `{other}`")),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Which repository implementation backs the services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Required for the PostgreSQL backend
    pub database: Option<DatabaseConfig>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Seconds
    pub access_token_expiry: i64,
    /// Seconds; also the lifetime of a device session
    pub refresh_token_expiry: i64,
}

/// Basic-auth credentials guarding admin endpoints
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub login: String,
    pub password: String,
}

/// Registration and recovery settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub confirmation_code_ttl_secs: i64,
    pub recovery_code_ttl_secs: i64,
    /// Set the `Secure` attribute on the refresh-token cookie
    pub secure_cookies: bool,
}

/// Rate limiting for `/auth` endpoints
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// One request slot is replenished every this many seconds
    pub replenish_interval_secs: u64,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "blog-platform".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    604_800 // 7 days
}

fn default_admin_login() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "qwerty".to_string()
}

fn default_code_ttl() -> i64 {
    3600
}

fn default_replenish_interval() -> u64 {
    2
}

fn default_burst() -> u32 {
    5
}

/// Read and parse an optional variable, falling back to `default` when unset
fn var_or<T: FromStr>(name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default()),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let app_env = var_or("APP_ENV", Environment::default)?;
        let backend = var_or("STORAGE_BACKEND", StorageBackend::default)?;
        let database = match (backend, env::var("DATABASE_URL")) {
            (_, Ok(url)) => Some(DatabaseConfig {
                url,
                max_connections: var_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: var_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            }),
            (StorageBackend::Postgres, Err(_)) => {
                return Err(ConfigError::MissingVar("DATABASE_URL"))
            }
            (StorageBackend::Memory, Err(_)) => None,
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: app_env,
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: var_or("API_PORT", default_port)?,
                request_timeout_secs: var_or("API_REQUEST_TIMEOUT_SECS", default_request_timeout)?,
            },
            storage: StorageConfig { backend, database },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: var_or("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
                refresh_token_expiry: var_or(
                    "JWT_REFRESH_TOKEN_EXPIRY",
                    default_refresh_token_expiry,
                )?,
            },
            admin: AdminConfig {
                login: env::var("ADMIN_LOGIN").unwrap_or_else(|_| default_admin_login()),
                password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| default_admin_password()),
            },
            auth: AuthConfig {
                confirmation_code_ttl_secs: var_or("AUTH_CONFIRMATION_TTL_SECS", default_code_ttl)?,
                recovery_code_ttl_secs: var_or("AUTH_RECOVERY_TTL_SECS", default_code_ttl)?,
                secure_cookies: var_or("AUTH_SECURE_COOKIES", || app_env.is_production())?,
            },
            rate_limit: RateLimitConfig {
                enabled: var_or("RATE_LIMIT_ENABLED", || true)?,
                replenish_interval_secs: var_or(
                    "RATE_LIMIT_REPLENISH_SECS",
                    default_replenish_interval,
                )?,
                burst: var_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            testing_routes_enabled: var_or("TESTING_ROUTES_ENABLED", || !app_env.is_production())?,
        })
    }

    /// In-memory configuration with defaults, for local runs and tests
    #[must_use]
    pub fn in_memory(jwt_secret: &str) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            api: ServerConfig {
                host: default_host(),
                port: 0,
                request_timeout_secs: default_request_timeout(),
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                database: None,
            },
            jwt: JwtConfig {
                secret: jwt_secret.to_string(),
                access_token_expiry: default_access_token_expiry(),
                refresh_token_expiry: default_refresh_token_expiry(),
            },
            admin: AdminConfig {
                login: default_admin_login(),
                password: default_admin_password(),
            },
            auth: AuthConfig {
                confirmation_code_ttl_secs: default_code_ttl(),
                recovery_code_ttl_secs: default_code_ttl(),
                secure_cookies: false,
            },
            rate_limit: RateLimitConfig {
                enabled: false,
                replenish_interval_secs: default_replenish_interval(),
                burst: default_burst(),
            },
            cors: CorsConfig::default(),
            testing_routes_enabled: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!("PRODUCTION".parse::<Environment>(), Ok(Environment::Production));
        assert!("qa".parse::<Environment>().is_err());
        assert!(Environment::Production.is_production());
        assert!(Environment::Development.is_development());
    }

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert_eq!("postgresql".parse::<StorageBackend>(), Ok(StorageBackend::Postgres));
        assert!("mongo".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 5,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_in_memory_config() {
        let config = AppConfig::in_memory("secret");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.storage.database.is_none());
        assert_eq!(config.admin.login, "admin");
        assert!(!config.rate_limit.enabled);
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "blog-platform");
        assert_eq!(default_access_token_expiry(), 900);
        assert_eq!(default_refresh_token_expiry(), 604_800);
        assert_eq!(default_code_ttl(), 3600);
    }
}
