//! Validation error types and field checks shared by every entity input

use std::fmt;

/// Validation error for entity inputs and admin forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty or absent
    Empty { field: &'static str },

    /// Text doesn't parse into the field's type (number, id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Value outside an enum domain
    InvalidVariant { field: &'static str, value: String },

    /// Numeric value outside its allowed range
    OutOfRange { field: &'static str, reason: &'static str },

    /// Match with the same team on both sides
    SameTeam,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::OutOfRange { field, reason } => write!(f, "{} {}", field, reason),
            Self::SameTeam => write!(f, "a team cannot play against itself"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject empty or whitespace-only text.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Reject an absent required value.
pub fn require_some<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Empty { field })
}

/// Reject negative integers; null passes.
pub fn non_negative(field: &'static str, value: Option<i32>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v < 0 => Err(ValidationError::OutOfRange {
            field,
            reason: "cannot be negative",
        }),
        _ => Ok(()),
    }
}

/// Blank optional text is stored as null.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Empty { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "home_score",
            reason: "cannot be negative",
        };
        assert_eq!(err.to_string(), "home_score cannot be negative");
    }

    #[test]
    fn whitespace_counts_as_empty() {
        assert_eq!(
            require("title", "   ").unwrap_err(),
            ValidationError::Empty { field: "title" }
        );
        assert!(require("title", "Derby day").is_ok());
    }

    #[test]
    fn blank_optional_text_becomes_null() {
        assert_eq!(blank_to_none(Some("  ".into())), None);
        assert_eq!(blank_to_none(Some("Nouakchott".into())), Some("Nouakchott".into()));
        assert_eq!(blank_to_none(None), None);
    }

    #[test]
    fn negative_values_rejected() {
        assert!(non_negative("away_score", Some(-1)).is_err());
        assert!(non_negative("away_score", Some(0)).is_ok());
        assert!(non_negative("away_score", None).is_ok());
    }
}
