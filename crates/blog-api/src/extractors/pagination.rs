//! Listing extractor
//!
//! Reads `pageNumber`, `pageSize`, `sortBy`, `sortDirection`, and the
//! search terms from the query string. Parsing and clamping happen in
//! [`ListParams::to_list_query`].

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use blog_service::dto::ListParams;

use crate::response::ApiError;

#[derive(Debug, Clone, Default)]
pub struct Listing(pub ListParams);

#[async_trait]
impl<S> FromRequestParts<S> for Listing
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        Ok(Listing(params))
    }
}
