//! Verification countdown state machine
//!
//! 纯状态机，不读时钟也不做 I/O；由 [`super::VerificationSession`]
//! 的 1 Hz ticker 驱动。
//!
//! ```text
//! Idle ──start──▶ Counting(300) ──tick × 300──▶ Expired
//!                      ▲                          │
//!                      └────────restart───────────┘
//! (any) ──stop──▶ Stopped
//! ```

use shared::models::CODE_TTL_SECS;

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not started yet
    Idle,
    /// Counting down, 1..=300 seconds left
    Counting(u32),
    /// Countdown reached zero, resend gate open
    Expired,
    /// Modal closed or verified, terminal
    Stopped,
}

/// 5 分钟验证码倒计时 + 重发闸门
#[derive(Debug, Clone)]
pub struct VerificationTimer {
    state: TimerState,
}

impl VerificationTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Enter `Counting(300)`
    pub fn start(&mut self) -> TimerState {
        if self.state != TimerState::Stopped {
            self.state = TimerState::Counting(CODE_TTL_SECS);
        }
        self.state
    }

    /// One logical second elapsed
    pub fn tick(&mut self) -> TimerState {
        self.catch_up(1)
    }

    /// Apply several elapsed seconds at once (late ticks after suspend/resume)
    ///
    /// 结果总是落在 `[0, 300]`，永远不会出现负数。
    pub fn catch_up(&mut self, elapsed_secs: u32) -> TimerState {
        if let TimerState::Counting(remaining) = self.state {
            let left = remaining.min(CODE_TTL_SECS).saturating_sub(elapsed_secs);
            self.state = if left == 0 {
                TimerState::Expired
            } else {
                TimerState::Counting(left)
            };
        }
        self.state
    }

    /// Successful resend: back to a full countdown
    pub fn restart(&mut self) -> TimerState {
        self.start()
    }

    /// Terminal; no further transitions
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    pub fn can_resend(&self) -> bool {
        self.state == TimerState::Expired
    }

    pub fn is_counting(&self) -> bool {
        matches!(self.state, TimerState::Counting(_))
    }

    pub fn remaining_secs(&self) -> u32 {
        match self.state {
            TimerState::Counting(n) => n,
            _ => 0,
        }
    }

    /// `M:SS`
    pub fn format_remaining(&self) -> String {
        format_countdown(self.remaining_secs())
    }
}

impl Default for VerificationTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render seconds as `M:SS` (minutes unpadded, seconds zero-padded)
pub fn format_countdown(secs: u32) -> String {
    let secs = secs.min(CODE_TTL_SECS);
    format!("{}:{:02}", secs / 60, secs % 60)
}
