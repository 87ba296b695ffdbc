//! Client error types

use shared::ValidationError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error envelope
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Input rejected before any request was made
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Request exceeded its time bound
    #[error("Request timed out")]
    Timeout,

    /// A resend request is already pending
    #[error("Resend already in progress")]
    ResendInFlight,

    /// Resend gate is closed while the countdown runs
    #[error("Resend not available for another {remaining_secs}s")]
    TimerNotExpired { remaining_secs: u32 },

    /// Session was closed (dismissed or verified)
    #[error("Verification session closed")]
    SessionClosed,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// 网络类错误：状态不变，用户可以再次尝试
    ///
    /// 服务端明确拒绝 (`Api`，如验证码错误、请求过于频繁) 不算。
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_status() || e.status().is_some_and(|s| s.is_server_error()),
            Self::Timeout => true,
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_only_for_network_failures() {
        assert!(ClientError::Timeout.is_retryable());

        let transport = reqwest::Client::new()
            .get("http://[::1")
            .build()
            .unwrap_err();
        assert!(ClientError::Http(transport).is_retryable());

        let rejected = ClientError::Api {
            code: "E3002".into(),
            message: "Invalid verification code".into(),
        };
        assert!(!rejected.is_retryable());
        let throttled = ClientError::Api {
            code: "E0429".into(),
            message: "Too many requests".into(),
        };
        assert!(!throttled.is_retryable());
        assert!(!ClientError::ResendInFlight.is_retryable());
    }
}
