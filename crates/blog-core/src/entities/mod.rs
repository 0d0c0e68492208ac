//! Domain entities - core business objects

mod blog;
mod comment;
mod post;
mod reaction;
mod session;
mod user;

pub use blog::Blog;
pub use comment::{Comment, CommentatorInfo};
pub use post::Post;
pub use reaction::{
    LikeStatus, LikesInfo, ReactableKind, Reaction, ReactionSet, ReactionTarget, Transition,
};
pub use session::DeviceSession;
pub use user::{EmailConfirmation, PasswordRecovery, User};
