//! Error types for the data-access contract
//!
//! Three kinds, none retried:
//! - validation: caught before any store call
//! - not found: the referenced id doesn't exist
//! - store: the backend call failed; the raw message is kept, not parsed

use thiserror::Error;

use crate::models::ValidationError;
use crate::store::StoreError;

/// Failure of a contract operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for contract operations
pub type DataResult<T> = std::result::Result<T, DataError>;

impl DataError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Store returned a row that doesn't decode into the entity.
    pub fn malformed(resource: &'static str, source: serde_json::Error) -> Self {
        Self::Store(StoreError::new(format!(
            "malformed {} row: {}",
            resource, source
        )))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::not_found("team", "42");
        assert_eq!(err.to_string(), "team '42' not found");

        let err: DataError = ValidationError::SameTeam.into();
        assert_eq!(err.to_string(), "a team cannot play against itself");
        assert!(err.is_validation());

        let err: DataError = StoreError::new("permission denied for table teams").into();
        assert_eq!(err.to_string(), "permission denied for table teams");
    }
}
