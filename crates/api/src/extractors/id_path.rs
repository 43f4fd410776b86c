//! User id path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use common::AppError;

/// `/{id}` segment parsed as a UUID; anything else rejects with
/// `AppError::InvalidPathParameter`.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("Rejected path parameter: {}", e.body_text());
                AppError::InvalidPathParameter
            })?;

        Ok(IdPath(id))
    }
}
