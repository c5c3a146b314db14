//! Uniform result envelope for the admin mutation surface
//!
//! `{success, data?, error?}` for create/update, `{success, error?}` for
//! delete. Failures never escape as errors past this point.

use serde::{Deserialize, Serialize};

use crate::error::DataResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

impl Envelope<()> {
    /// Successful delete; serializes as `{"success": true}`.
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn deletion(result: DataResult<()>) -> Self {
        match result {
            Ok(()) => Self::done(),
            Err(e) => Self::failed(e),
        }
    }
}

impl<T> From<DataResult<T>> for Envelope<T> {
    fn from(result: DataResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use serde_json::json;

    #[test]
    fn success_carries_data() {
        let env: Envelope<u32> = Ok(7).into();
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({"success": true, "data": 7})
        );
    }

    #[test]
    fn failure_carries_message_only() {
        let env: Envelope<u32> = Err(DataError::not_found("news", "abc")).into();
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({"success": false, "error": "news 'abc' not found"})
        );
    }

    #[test]
    fn delete_envelope_has_no_data_key() {
        let json = serde_json::to_value(Envelope::deletion(Ok(()))).unwrap();
        assert_eq!(json, json!({"success": true}));
    }
}
