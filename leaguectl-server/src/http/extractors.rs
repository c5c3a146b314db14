//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use leaguectl_core::ValidationError;

use super::error::ApiError;

/// Parse a record id from path text.
pub fn parse_id(id: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id",
        reason: "invalid UUID format",
    })
}

/// Extract and validate a UUID from path
pub struct ValidUuid(pub Uuid);

impl<S> FromRequestParts<S> for ValidUuid
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        Ok(Self(parse_id(&id)?))
    }
}
