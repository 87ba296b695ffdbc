//! "Send verification code" capability
//!
//! 会话只关心调用成功与否，不关心请求/响应的具体结构。

use async_trait::async_trait;
use shared::models::{MessageResponse, SendCodeRequest, VerificationCode, VerifyCodeRequest};

use crate::{ClientResult, HttpClient};

pub const SEND_CODE_PATH: &str = "api/auth/email/send-code";
pub const VERIFY_CODE_PATH: &str = "api/auth/email/verify-code";

/// Outbound verification-code calls, injected into the session
#[async_trait]
pub trait CodeSender: Send + Sync {
    /// Ask the server to email a fresh code
    async fn send_code(&self, email: &str) -> ClientResult<()>;

    /// Check a code the user typed
    async fn verify_code(&self, email: &str, code: &VerificationCode) -> ClientResult<()>;
}

#[async_trait]
impl CodeSender for HttpClient {
    async fn send_code(&self, email: &str) -> ClientResult<()> {
        let req = SendCodeRequest::new(email)?;
        let resp = self.call::<MessageResponse, _>(SEND_CODE_PATH, &req).await?;
        tracing::debug!(email = %req.email, message = %resp.message, "Send code acknowledged");
        Ok(())
    }

    async fn verify_code(&self, email: &str, code: &VerificationCode) -> ClientResult<()> {
        let req = VerifyCodeRequest {
            email: SendCodeRequest::new(email)?.email,
            code: code.clone(),
        };
        self.call::<MessageResponse, _>(VERIFY_CODE_PATH, &req).await?;
        Ok(())
    }
}
