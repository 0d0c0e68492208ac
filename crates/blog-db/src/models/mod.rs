//! Database models - SQLx-compatible structs for PostgreSQL tables

mod blog;
mod comment;
mod post;
mod reaction;
mod session;
mod user;

pub use blog::BlogModel;
pub use comment::CommentModel;
pub use post::PostModel;
pub use reaction::ReactionModel;
pub use session::DeviceSessionModel;
pub use user::UserModel;
