//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod blog;
pub mod comment;
pub mod context;
pub mod error;
pub mod post;
pub mod reaction;
pub mod security;
pub mod testing;
pub mod user;

// Re-export all services for convenience
pub use auth::AuthService;
pub use blog::BlogService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use post::PostService;
pub use reaction::ReactionService;
pub use security::{ClientInfo, SecurityService};
pub use testing::TestingService;
pub use user::UserService;
