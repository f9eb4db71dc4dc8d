//! Response envelopes shared by the gateway and the dashboard client.

use serde::{Deserialize, Serialize};

use crate::quote::Quote;

/// Uniform gateway success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Uniform gateway failure body: `{"success": false, "message": ...}`.
///
/// The HTTP status carries the error class; `message` is forwarded
/// verbatim from upstream when one was supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Paginated quote listing returned by the quote list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotePage {
    pub data: Vec<Quote>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
}

/// Payload of a successful delete: the id that was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: String,
}

/// ServiceNow Table API envelope: `{"result": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnResult<T> {
    pub result: T,
}

/// ServiceNow structured error body:
/// `{"error": {"message": ..., "detail": ...}, "status": "failure"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnErrorBody {
    pub error: SnErrorDetail,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SnErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let env = Envelope::ok(vec![1, 2, 3]);
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value, json!({"success": true, "data": [1, 2, 3]}));
    }

    #[test]
    fn error_body_shape() {
        let body = ErrorBody::new("record not found");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "message": "record not found"})
        );
    }

    #[test]
    fn sn_error_body_parses_standard_failure() {
        let body: SnErrorBody = serde_json::from_value(json!({
            "error": {"message": "No Record found", "detail": "Record doesn't exist"},
            "status": "failure"
        }))
        .unwrap();
        assert_eq!(body.error.message, "No Record found");
    }
}
