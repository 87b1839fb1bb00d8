// handlers/mod.rs - one module per service, one file per resource
//
// trivia   → /categories, /questions, /quizzes
// coffee   → /drinks, /drinks-detail (permission-gated writes)
// listings → /venues, /artists, /shows

pub mod coffee;
pub mod health;
pub mod listings;
pub mod trivia;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};

use crate::error::ApiError;
use crate::filter::PageQuery;
use crate::types::DbId;

/// Numeric `:id` path segment. Anything that is not an integer id names no
/// resource, so it is a 404 rather than a framework rejection.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found("resource not found"))?;
        Ok(IdPath(id))
    }
}

/// 1-based `?page=N`, defaulting to 1. A query string that does not parse
/// at all (e.g. a repeated `page`) is a 400 in the usual error envelope.
#[derive(Debug, Clone, Copy)]
pub struct PageNumber(pub usize);

#[async_trait]
impl<S> FromRequestParts<S> for PageNumber
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;
        Ok(PageNumber(query.page()?))
    }
}
