//! Service context - dependency container for services
//!
//! Holds the repositories, token and password services, the mailer, and
//! the auth settings every service reads.

use std::sync::Arc;

use blog_common::auth::{JwtService, PasswordService};
use blog_common::{AdminConfig, AuthConfig};
use blog_core::traits::{
    BlogRepository, CommentRepository, DataMaintenance, PostRepository, ReactionRepository,
    SessionRepository, UserRepository,
};

use crate::mail::Mailer;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Built once at startup and shared by handle; services borrow it.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    blog_repo: Arc<dyn BlogRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    user_repo: Arc<dyn UserRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    session_repo: Arc<dyn SessionRepository>,
    maintenance: Arc<dyn DataMaintenance>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    mailer: Arc<dyn Mailer>,

    // Settings
    auth_config: AuthConfig,
    admin_config: AdminConfig,
}

impl ServiceContext {
    // === Repositories ===

    pub fn blog_repo(&self) -> &dyn BlogRepository {
        self.blog_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    pub fn maintenance(&self) -> &dyn DataMaintenance {
        self.maintenance.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }

    // === Settings ===

    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth_config
    }

    pub fn admin_config(&self) -> &AdminConfig {
        &self.admin_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("auth_config", &self.auth_config)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    blog_repo: Option<Arc<dyn BlogRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    maintenance: Option<Arc<dyn DataMaintenance>>,
    jwt_service: Option<Arc<JwtService>>,
    mailer: Option<Arc<dyn Mailer>>,
    auth_config: Option<AuthConfig>,
    admin_config: Option<AdminConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one store for every repository
    pub fn store<S>(self, store: S) -> Self
    where
        S: BlogRepository
            + PostRepository
            + CommentRepository
            + UserRepository
            + ReactionRepository
            + SessionRepository
            + DataMaintenance
            + 'static,
    {
        let store = Arc::new(store);
        self.blog_repo(store.clone())
            .post_repo(store.clone())
            .comment_repo(store.clone())
            .user_repo(store.clone())
            .reaction_repo(store.clone())
            .session_repo(store.clone())
            .maintenance(store)
    }

    pub fn blog_repo(mut self, repo: Arc<dyn BlogRepository>) -> Self {
        self.blog_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn maintenance(mut self, maintenance: Arc<dyn DataMaintenance>) -> Self {
        self.maintenance = Some(maintenance);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn auth_config(mut self, config: AuthConfig) -> Self {
        self.auth_config = Some(config);
        self
    }

    pub fn admin_config(mut self, config: AdminConfig) -> Self {
        self.admin_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            blog_repo: required(self.blog_repo, "blog_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            user_repo: required(self.user_repo, "user_repo")?,
            reaction_repo: required(self.reaction_repo, "reaction_repo")?,
            session_repo: required(self.session_repo, "session_repo")?,
            maintenance: required(self.maintenance, "maintenance")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            password_service: PasswordService::new(),
            mailer: required(self.mailer, "mailer")?,
            auth_config: required(self.auth_config, "auth_config")?,
            admin_config: required(self.admin_config, "admin_config")?,
        })
    }
}
