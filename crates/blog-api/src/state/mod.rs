//! Shared handler state

use std::sync::Arc;

use blog_common::{AdminConfig, AppConfig, JwtService};
use blog_service::ServiceContext;

/// Cloned into every handler; both halves are behind `Arc`
#[derive(Clone)]
pub struct AppState {
    services: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            services: Arc::new(services),
            config: Arc::new(config),
        }
    }

    /// Repositories, mailer, and token/password services
    pub fn service_context(&self) -> &ServiceContext {
        &self.services
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.services.jwt_service()
    }

    /// Credentials accepted by Basic auth
    pub fn admin(&self) -> &AdminConfig {
        self.services.admin_config()
    }

    /// Whether the refresh-token cookie carries `Secure`
    pub fn secure_cookies(&self) -> bool {
        self.services.auth_config().secure_cookies
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.config.storage.backend)
            .field("env", &self.config.app.env)
            .finish_non_exhaustive()
    }
}
