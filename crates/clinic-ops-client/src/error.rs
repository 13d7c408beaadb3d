//! API error taxonomy.

use serde_json::Value;
use thiserror::Error;

/// Failure modes of a backend call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never completed (DNS, TLS, timeout, connection reset).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("api error {status}: {message}")]
    Http {
        status: u16,
        message: String,
        /// Decoded error body, when the backend sent JSON. Conflict
        /// resolution reads `existing_id` / `patient.id` out of this.
        body: Option<Value>,
    },

    /// The response body was not the JSON we expected.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether this failure is a duplicate-record conflict.
    ///
    /// Some deployments front the API with proxies that rewrite the
    /// status but keep the message, so the message text is checked too.
    pub fn is_conflict(&self) -> bool {
        match self {
            ApiError::Http { status, message, .. } => {
                *status == 409 || message.contains("409") || message.contains("Conflict")
            }
            _ => false,
        }
    }

    /// The decoded error payload, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http(status: u16, message: &str) -> ApiError {
        ApiError::Http {
            status,
            message: message.into(),
            body: None,
        }
    }

    #[test]
    fn test_conflict_by_status() {
        assert!(http(409, "duplicate").is_conflict());
        assert!(!http(500, "boom").is_conflict());
    }

    #[test]
    fn test_conflict_by_message() {
        assert!(http(400, "upstream said 409").is_conflict());
        assert!(http(400, "Conflict: patient exists").is_conflict());
        assert!(!http(400, "validation failed").is_conflict());
    }

    #[test]
    fn test_body_exposed_for_http_only() {
        let err = ApiError::Http {
            status: 409,
            message: "Conflict".into(),
            body: Some(json!({ "existing_id": "P42" })),
        };
        assert_eq!(err.body().unwrap()["existing_id"], "P42");
    }
}
