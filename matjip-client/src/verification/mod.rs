//! Email verification flow
//!
//! - [`VerificationTimer`] - 5 分钟倒计时状态机 (纯逻辑)
//! - [`VerificationSession`] - 弹窗生命周期：ticker、重发闸门、in-flight 保护
//! - [`CodeSender`] - 注入的发送/校验能力，[`crate::HttpClient`] 提供网络实现

mod sender;
mod session;
mod timer;

pub use sender::{CodeSender, SEND_CODE_PATH, VERIFY_CODE_PATH};
pub use session::{SessionSnapshot, VerificationSession};
pub use timer::{TimerState, VerificationTimer, format_countdown};
