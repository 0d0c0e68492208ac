//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in blog-core.
//! Each repository handles database operations for a specific domain entity.

mod blog;
mod comment;
mod error;
mod maintenance;
mod post;
mod reaction;
mod session;
mod user;

pub use blog::PgBlogRepository;
pub use comment::PgCommentRepository;
pub use maintenance::PgMaintenance;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use session::PgSessionRepository;
pub use user::PgUserRepository;

pub(crate) use error::map_db_error;
