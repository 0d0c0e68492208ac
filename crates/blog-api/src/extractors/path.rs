//! Path parameter extractors
//!
//! Every resource id is a UUID. A segment that does not parse cannot name
//! an existing resource, so it is reported as 404 rather than 400.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::response::ApiError;

/// The single `:id`-style segment of a route
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        raw.parse().map(IdPath).map_err(|_| ApiError::NotFound)
    }
}
