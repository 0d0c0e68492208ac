//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    BlogInput, BlogPostInput, CommentInput, ConfirmationInput, EmailInput, LikeStatusInput,
    ListParams, LoginInput, NewPasswordInput, PostInput, UserInput,
};

pub use responses::{
    AccessTokenView, BlogView, CommentView, CommentatorInfoView, DeviceView,
    ExtendedLikesInfoView, LikeDetailsView, LikesInfoView, MeView, PageView, PostView,
    SessionTokens, UserView,
};
