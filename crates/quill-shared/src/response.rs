//! Uniform response envelope.
//!
//! Success: `{"status": "success", "message"?, "data"?}`.
//! Failure: `{"status": "error", "message", "errors"?}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

/// Error envelope. `errors` maps field names to messages for validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = Some(errors);
        self
    }

    // Common error constructors
    pub fn validation(errors: BTreeMap<String, Vec<String>>) -> Self {
        Self::new("The given data was invalid.").with_errors(errors)
    }

    pub fn internal_error() -> Self {
        Self::new("Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_missing_message() {
        let body = serde_json::to_value(ApiResponse::ok(1)).unwrap();
        assert_eq!(body, json!({"status": "success", "data": 1}));
    }

    #[test]
    fn validation_error_carries_field_messages() {
        let mut errors = BTreeMap::new();
        errors.insert("slug".to_string(), vec!["taken".to_string()]);

        let body = serde_json::to_value(ErrorResponse::validation(errors)).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "The given data was invalid.");
        assert_eq!(body["errors"]["slug"][0], "taken");
    }

    #[test]
    fn plain_error_has_no_errors_key() {
        let body = serde_json::to_value(ErrorResponse::new("Post not found.")).unwrap();
        assert_eq!(body, json!({"status": "error", "message": "Post not found."}));
    }
}
