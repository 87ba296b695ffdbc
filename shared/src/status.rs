//! Business status evaluation (영업 상태)
//!
//! 根据当前时间 + 每周营业时间 + 休息时段文本，判断餐厅当前
//! 营业中 / 休息中 / 已关门。纯函数，无 I/O，每次渲染都可以调用。
//!
//! 区间均为半开区间 `[open, close)`：关门时刻视为已关门。
//! 不支持跨午夜营业 (close < open)，这类数据在午夜前后都判定为关门。

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize, Serializer};

use crate::models::{BreakTime, DayKey, WeeklyHours, minute_of_day};

/// Why a restaurant is shown as closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClosedReason {
    /// No hours data at all
    NoInformation,
    /// Today has no entry or is marked closed
    DayOff,
    /// Outside today's opening window
    AfterHours,
}

/// Displayed business status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessStatus {
    Open,
    Break,
    Closed(ClosedReason),
}

impl BusinessStatus {
    /// Short label for the presentation layer
    pub fn label(&self) -> &'static str {
        match self {
            BusinessStatus::Open => "영업중",
            BusinessStatus::Break => "브레이크타임",
            BusinessStatus::Closed(ClosedReason::NoInformation) => "정보 없음",
            BusinessStatus::Closed(ClosedReason::DayOff) => "휴무일",
            BusinessStatus::Closed(ClosedReason::AfterHours) => "영업 종료",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BusinessStatus::Open => "open",
            BusinessStatus::Break => "break",
            BusinessStatus::Closed(_) => "closed",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, BusinessStatus::Open)
    }
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 前端消费的格式: `{ "kind": "break", "label": "브레이크타임" }`
#[derive(Serialize)]
struct StatusView {
    kind: &'static str,
    label: &'static str,
}

impl Serialize for BusinessStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StatusView {
            kind: self.kind(),
            label: self.label(),
        }
        .serialize(serializer)
    }
}

/// Evaluate the status of a restaurant at `now`
///
/// 步骤:
/// 1. 没有营业时间数据 → 정보 없음
/// 2. 今天无条目或 closed → 휴무일
/// 3. 在休息时段内 → 브레이크타임 (优先于营业中)
/// 4. `[open, close)` 内 → 영업중
/// 5. 其余 → 영업 종료
///
/// 格式错误的时间不会报错，该边界的比较恒为 false，最终落到 영업 종료。
pub fn evaluate<T>(now: &T, hours: Option<&WeeklyHours>, break_text: Option<&str>) -> BusinessStatus
where
    T: Datelike + Timelike,
{
    let Some(hours) = hours else {
        return BusinessStatus::Closed(ClosedReason::NoInformation);
    };

    let today = match hours.get(DayKey::of(now)) {
        Some(day) if !day.closed => day,
        _ => return BusinessStatus::Closed(ClosedReason::DayOff),
    };

    let current = minute_of_day(now);

    if let Some(window) = break_text.and_then(BreakTime::find)
        && window.contains(current)
    {
        return BusinessStatus::Break;
    }

    match (today.open_time(), today.close_time()) {
        (Some(open), Some(close)) if open <= current && current < close => BusinessStatus::Open,
        _ => BusinessStatus::Closed(ClosedReason::AfterHours),
    }
}

/// Hours block as returned by the restaurant detail API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantHours {
    #[serde(default)]
    pub business_hours: Option<WeeklyHours>,
    #[serde(default)]
    pub break_time: Option<String>,
}

impl RestaurantHours {
    pub fn status_at<T: Datelike + Timelike>(&self, now: &T) -> BusinessStatus {
        evaluate(now, self.business_hours.as_ref(), self.break_time.as_deref())
    }
}
