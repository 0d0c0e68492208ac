//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, paths, and listing.

mod auth;
mod client;
mod pagination;
mod path;
mod validated;

pub use auth::{AdminAuth, AuthUser, OptionalAuthUser, RefreshToken, REFRESH_COOKIE};
pub use client::Client;
pub use pagination::Listing;
pub use path::IdPath;
pub use validated::{JsonBody, ValidatedJson};
