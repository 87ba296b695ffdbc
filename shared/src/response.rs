//! API Response envelope
//!
//! 远程 API 的统一返回格式，客户端按此解包

use serde::{Deserialize, Serialize};

/// Success code
pub const API_CODE_SUCCESS: &str = "E0000";

/// Unified API response structure
///
/// ```json
/// {
///     "code": "E0000",
///     "message": "Success",
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (E0000 = success, others = error codes)
    pub code: String,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Request trace ID for debugging (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == API_CODE_SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_without_data() {
        let resp: ApiResponse<()> =
            serde_json::from_str(r#"{"code":"E0000","message":"Verification code resent"}"#)
                .unwrap();
        assert!(resp.is_success());
        assert!(resp.data.is_none());

        let err: ApiResponse<()> =
            serde_json::from_str(r#"{"code":"E0429","message":"Too many requests"}"#).unwrap();
        assert!(!err.is_success());
    }
}
