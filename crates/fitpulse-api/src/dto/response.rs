//! Response envelope DTOs.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every successful JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` for this envelope; error bodies use their own shape.
    pub success: bool,
    /// The operation's payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body for operations whose only output is an acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable acknowledgement.
    pub message: String,
}

/// Body for count-style lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// The computed count.
    pub count: i64,
}

/// Body of the bulk mark-as-read operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAllReadResponse {
    /// How many notifications were flipped to read.
    pub marked: u64,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` while the process is serving requests.
    pub status: String,
    /// Crate version baked in at compile time.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_read_body_serializes_count() {
        let marked: u64 = 2;
        let value = serde_json::to_value(ApiResponse::ok(MarkAllReadResponse { marked })).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "success": true, "data": { "marked": 2 } })
        );
    }
}
