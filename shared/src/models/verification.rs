//! Email Verification Model (邮箱验证码)
//!
//! 服务端签发 6 位数字验证码，有效期 5 分钟；
//! 客户端倒计时与之对齐。

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ValidationError, ValidationResult};

/// Verification code length (digits)
pub const CODE_LENGTH: usize = 6;

/// Code lifetime and resend cooldown, seconds
pub const CODE_TTL_SECS: u32 = 300;

/// A syntactically valid verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerificationCode(String);

impl VerificationCode {
    /// 校验用户输入：去掉首尾空白后必须是 6 位 ASCII 数字
    pub fn parse(input: &str) -> ValidationResult<Self> {
        let code = input.trim();
        let actual = code.chars().count();
        if actual != CODE_LENGTH {
            return Err(ValidationError::CodeLength {
                expected: CODE_LENGTH,
                actual,
            });
        }
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::CodeNotNumeric);
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VerificationCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VerificationCode> for String {
    fn from(code: VerificationCode) -> Self {
        code.0
    }
}

/// Request a new code for an email address
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    #[validate(email)]
    pub email: String,
}

impl SendCodeRequest {
    /// Normalized (trimmed, lowercased) and validated request
    pub fn new(email: &str) -> ValidationResult<Self> {
        let req = Self {
            email: email.trim().to_lowercase(),
        };
        req.validate()
            .map_err(|_| ValidationError::Email(req.email.clone()))?;
        Ok(req)
    }
}

/// Submit a code for verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: VerificationCode,
}

/// Plain `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_parse() {
        assert_eq!(VerificationCode::parse("123456").unwrap().as_str(), "123456");
        assert_eq!(VerificationCode::parse(" 000111 ").unwrap().as_str(), "000111");

        assert_eq!(
            VerificationCode::parse("12345"),
            Err(ValidationError::CodeLength {
                expected: 6,
                actual: 5
            })
        );
        assert_eq!(
            VerificationCode::parse("12a456"),
            Err(ValidationError::CodeNotNumeric)
        );
        assert!(VerificationCode::parse("１２３４５６").is_err());
    }

    #[test]
    fn test_code_serde() {
        let req = VerifyCodeRequest {
            email: "a@b.kr".into(),
            code: VerificationCode::parse("987654").unwrap(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["code"], "987654");

        let bad = serde_json::from_str::<VerifyCodeRequest>(r#"{"email":"a@b.kr","code":"12"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_send_code_request_normalizes_email() {
        let req = SendCodeRequest::new("  Foodie@Example.COM ").unwrap();
        assert_eq!(req.email, "foodie@example.com");

        assert!(matches!(
            SendCodeRequest::new("not-an-email"),
            Err(ValidationError::Email(_))
        ));
    }
}
