//! Integer id path parameter extractor.

use crate::errors::{AppError, ErrorCode};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extractor for numeric resource ids in the path.
///
/// A segment that is not an unsigned integer cannot name any resource, so it
/// rejects with 404 rather than 400.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_user(IdPath(id): IdPath) -> String {
///     format!("User ID: {}", id)
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub u64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;

        raw.parse::<u64>().map(IdPath).map_err(|_| {
            tracing::debug!(
                error_code = ErrorCode::InvalidId.code(),
                id = %raw,
                "Path id is not an integer"
            );
            AppError::NotFound(format!("No resource with id '{raw}'."))
        })
    }
}
