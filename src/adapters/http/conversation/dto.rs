//! HTTP DTOs for conversation endpoints.
//!
//! The reply body is the dialogue's [`ResponsePayload`] unchanged, so
//! only the request and error shapes live here.

use serde::{Deserialize, Serialize};

pub use crate::domain::dialogue::ResponsePayload;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One inbound user message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self {
            code: "SERVICE_UNAVAILABLE".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_message_request_deserializes() {
        let req: SendMessageRequest =
            serde_json::from_str(r#"{"message": "₹5-10 Lakhs"}"#).unwrap();
        assert_eq!(req.message, "₹5-10 Lakhs");
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::bad_request("Invalid input")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "BAD_REQUEST", "message": "Invalid input" })
        );
    }

    #[test]
    fn error_response_carries_details() {
        let error = ErrorResponse::service_unavailable("Inventory is unavailable")
            .with_details(serde_json::json!({ "retryable": true }));
        assert_eq!(error.code, "SERVICE_UNAVAILABLE");
        assert_eq!(error.details.unwrap()["retryable"], true);
    }
}
