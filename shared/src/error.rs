//! Error types for the shared crate
//!
//! 营业时间的异常在评估时就地降级为 Closed，不会向上抛出；
//! 这里的错误只用于显式校验 (数据录入、表单输入)。

use thiserror::Error;

use crate::models::DayKey;

/// Weekly hours validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoursError {
    /// Day is open but lacks open or close time
    #[error("{day}: open day must have both open and close time")]
    MissingBoundary { day: DayKey },

    /// Time string is not `HH:MM`
    #[error("{day}: malformed time '{value}', expected HH:MM")]
    MalformedTime { day: DayKey, value: String },
}

/// Input validation error (email, verification code)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Invalid email address
    #[error("Invalid email address: {0}")]
    Email(String),

    /// Code has wrong length
    #[error("Verification code must be {expected} digits, got {actual}")]
    CodeLength { expected: usize, actual: usize },

    /// Code contains non-digit characters
    #[error("Verification code must contain digits only")]
    CodeNotNumeric,
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
