//! Verification session - 验证码弹窗的生命周期
//!
//! 弹窗打开时创建，关闭或验证成功时销毁。持有倒计时状态机、
//! 1 Hz ticker 任务和重发的 in-flight 标记。
//!
//! ticker 通过 [`CancellationToken`] 释放：`close()`、验证成功、
//! 以及 `Drop` 都会取消，任何退出路径都不会遗留定时任务。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use shared::models::{CODE_LENGTH, SendCodeRequest, VerificationCode};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::{CodeSender, TimerState, VerificationTimer};
use crate::{ClientConfig, ClientError, ClientResult};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What the modal renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub remaining_secs: u32,
    /// `M:SS`
    pub display: String,
    pub resend_enabled: bool,
    pub code_length: usize,
    pub error: Option<String>,
}

/// A running 1 Hz ticker and the token that stops only it
struct Ticker {
    handle: JoinHandle<()>,
    stop: CancellationToken,
}

/// Releases the in-flight flag on every exit path
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 邮箱验证会话
///
/// 必须在 tokio runtime 内创建 (会 spawn ticker)。
pub struct VerificationSession {
    email: String,
    sender: Arc<dyn CodeSender>,
    timer: Arc<Mutex<VerificationTimer>>,
    last_error: Mutex<Option<String>>,
    resend_in_flight: AtomicBool,
    shutdown: CancellationToken,
    ticker: Mutex<Option<Ticker>>,
    resend_timeout: Duration,
    allow_early_resend: bool,
}

impl VerificationSession {
    /// Open the modal: validate the address, start counting, spawn the ticker
    pub fn open(
        email: &str,
        sender: Arc<dyn CodeSender>,
        config: &ClientConfig,
    ) -> ClientResult<Self> {
        let email = SendCodeRequest::new(email)?.email;

        let session = Self {
            email,
            sender,
            timer: Arc::new(Mutex::new(VerificationTimer::new())),
            last_error: Mutex::new(None),
            resend_in_flight: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
            ticker: Mutex::new(None),
            resend_timeout: config.resend_timeout,
            allow_early_resend: config.allow_early_resend,
        };
        session.restart_countdown();

        tracing::info!(email = %session.email, "Verification session opened");
        Ok(session)
    }

    /// Send the first code, then open the session
    ///
    /// 首次发送失败时不创建会话，错误直接返回给调用方。
    pub async fn send_and_open(
        email: &str,
        sender: Arc<dyn CodeSender>,
        config: &ClientConfig,
    ) -> ClientResult<Self> {
        let email = SendCodeRequest::new(email)?.email;
        bounded(config.resend_timeout, sender.send_code(&email)).await?;
        Self::open(&email, sender, config)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn state(&self) -> TimerState {
        self.timer.lock().state()
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Whether the 1 Hz ticker task is still alive
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .lock()
            .as_ref()
            .is_some_and(|t| !t.handle.is_finished())
    }

    /// Pending error message shown under the code input
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let timer = self.timer.lock();
        SessionSnapshot {
            remaining_secs: timer.remaining_secs(),
            display: timer.format_remaining(),
            resend_enabled: timer.can_resend() || (self.allow_early_resend && timer.is_counting()),
            code_length: CODE_LENGTH,
            error: self.last_error(),
        }
    }

    /// Request a new code
    ///
    /// - 倒计时未结束 → `TimerNotExpired` (不会发请求)
    /// - 已有请求在途 → `ResendInFlight`
    /// - 网络失败/超时 → 状态不变，错误记录到 `last_error`
    /// - 成功 → 倒计时重置为 300 秒，清除错误
    pub async fn resend(&self) -> ClientResult<()> {
        if self.is_closed() {
            return Err(ClientError::SessionClosed);
        }

        {
            let timer = self.timer.lock();
            if !timer.can_resend() && !self.allow_early_resend {
                return Err(ClientError::TimerNotExpired {
                    remaining_secs: timer.remaining_secs(),
                });
            }
        }

        let Some(_guard) = InFlightGuard::acquire(&self.resend_in_flight) else {
            tracing::debug!(email = %self.email, "Resend ignored, request already pending");
            return Err(ClientError::ResendInFlight);
        };

        match bounded(self.resend_timeout, self.sender.send_code(&self.email)).await {
            Ok(()) => {
                if self.is_closed() {
                    return Err(ClientError::SessionClosed);
                }
                self.restart_countdown();
                *self.last_error.lock() = None;
                tracing::info!(email = %self.email, "Verification code resent");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(email = %self.email, error = %e, "Failed to resend verification code");
                *self.last_error.lock() = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Submit the code the user typed; success closes the session
    pub async fn verify(&self, input: &str) -> ClientResult<()> {
        if self.is_closed() {
            return Err(ClientError::SessionClosed);
        }

        let code = match VerificationCode::parse(input) {
            Ok(code) => code,
            Err(e) => {
                *self.last_error.lock() = Some(e.to_string());
                return Err(e.into());
            }
        };

        match bounded(self.resend_timeout, self.sender.verify_code(&self.email, &code)).await {
            Ok(()) => {
                tracing::info!(email = %self.email, "Email verified");
                self.close();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(email = %self.email, error = %e, "Verification failed");
                *self.last_error.lock() = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Dismiss the modal: stop the timer and release the ticker
    pub fn close(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.shutdown.cancel();
        self.timer.lock().stop();
        tracing::debug!(email = %self.email, "Verification session closed");
    }

    /// Full 300 s countdown on a fresh ticker
    ///
    /// 旧 ticker 先取消再重置计时器：它在持锁时检查取消，
    /// 所以重置之后不会再多减一次，新的倒计时从完整的 1 秒相位开始。
    fn restart_countdown(&self) {
        let mut slot = self.ticker.lock();
        if let Some(old) = slot.take() {
            old.stop.cancel();
        }
        self.timer.lock().restart();

        let stop = self.shutdown.child_token();
        let handle = tokio::spawn(run_ticker(self.timer.clone(), stop.clone()));
        *slot = Some(Ticker { handle, stop });
    }
}

impl Drop for VerificationSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// 每秒 tick 一次，直到 Expired / Stopped 或被取消
///
/// `MissedTickBehavior::Skip`：挂起恢复后积压的 tick 只算一次，
/// 不会在同一逻辑秒内多次递减。
async fn run_ticker(timer: Arc<Mutex<VerificationTimer>>, stop: CancellationToken) {
    let mut interval = tokio::time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = stop.cancelled() => break,
            _ = interval.tick() => {
                let state = {
                    let mut timer = timer.lock();
                    if stop.is_cancelled() {
                        break;
                    }
                    timer.tick()
                };
                match state {
                    TimerState::Counting(_) => {}
                    TimerState::Expired => {
                        tracing::debug!("Verification countdown expired, resend enabled");
                        break;
                    }
                    TimerState::Idle | TimerState::Stopped => break,
                }
            }
        }
    }
}

/// Apply the configured time bound; expiry is reported as `Timeout`
async fn bounded<F>(limit: Duration, call: F) -> ClientResult<()>
where
    F: std::future::Future<Output = ClientResult<()>>,
{
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(ClientError::Timeout))
}
