//! # blog-core
//!
//! Domain layer containing entities, the reaction engine, the storage-neutral
//! query model, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod query;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    Blog, Comment, CommentatorInfo, DeviceSession, EmailConfirmation, LikeStatus, LikesInfo,
    PasswordRecovery, Post, ReactableKind, Reaction, ReactionSet, ReactionTarget, Transition,
    User,
};
pub use error::DomainError;
pub use query::{
    Filter, FilterOp, FilterValue, ListQuery, Page, PageRequest, Record, Sort, SortDirection,
};
pub use traits::{
    BlogRepository, CommentRepository, DataMaintenance, PostRepository, ReactionRepository,
    RepoResult, SessionRepository, UserRepository,
};
