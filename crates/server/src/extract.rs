//! Request extractors that reject with JSON [`AppError`] bodies.
//!
//! axum's own `Json` and `Query` reject with plain text; the dashboard and
//! landing page expect `{"message": ...}` for every failure.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use project_germany_core::EnquiryId;

use crate::error::AppError;

/// JSON body extractor.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Query string extractor.
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Enquiry identifier from the `{id}` path segment.
///
/// Anything that is not an identifier cannot name a stored enquiry, so it is
/// reported as not found rather than as a bad request.
pub struct EnquiryPath(pub EnquiryId);

impl<S> FromRequestParts<S> for EnquiryPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        raw.parse::<EnquiryId>()
            .map(Self)
            .map_err(|_| enquiry_not_found())
    }
}

/// The 404 returned for unknown enquiry identifiers.
#[must_use]
pub fn enquiry_not_found() -> AppError {
    AppError::NotFound("Enquiry not found".to_owned())
}
